use solana_program::pubkey::Pubkey;
use solana_rpc_client_api::client_error::Error as RpcError;
use thiserror::Error;

use crate::layout::FieldKind;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Malformed input: needed {expected} bytes, got {actual}")]
    MalformedInput { expected: usize, actual: usize },

    #[error("Invalid {kind} discriminator: expected {expected:?}, got {actual:?}")]
    DiscriminatorMismatch {
        kind: &'static str,
        expected: [u8; 8],
        actual: [u8; 8],
    },

    #[error("Account {address} is owned by {actual}, expected {expected}")]
    OwnershipMismatch {
        address: Pubkey,
        expected: Pubkey,
        actual: Pubkey,
    },

    #[error("Value for field `{field}` does not match {expected:?}")]
    ValueMismatch {
        field: &'static str,
        expected: FieldKind,
    },

    #[error("Layout has {expected} fields, got {actual} values")]
    FieldCountMismatch { expected: usize, actual: usize },

    #[error("Requested {expected} accounts, transport returned {actual}")]
    AccountCountMismatch { expected: usize, actual: usize },

    #[error("Unknown instruction discriminator {0:?}")]
    UnknownInstruction([u8; 8]),

    #[error("Rpc Error: {0}")]
    RpcError(#[from] RpcError),
}
