pub mod claim_status;
pub mod merkle_distributor;
pub mod sol_custody;

pub use claim_status::ClaimStatus;
pub use merkle_distributor::MerkleDistributor;
pub use sol_custody::SolCustody;

use crate::{
    error::ClientError,
    layout::{DecodedFields, Layout, Value},
    Result,
};

pub const DISCRIMINATOR_LEN: usize = 8;

/// Splits the 8-byte discriminator off `data` and checks it against `expected`.
pub(crate) fn strip_discriminator<'a>(
    kind: &'static str,
    expected: &[u8; DISCRIMINATOR_LEN],
    data: &'a [u8],
) -> Result<&'a [u8]> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(ClientError::MalformedInput {
            expected: DISCRIMINATOR_LEN,
            actual: data.len(),
        });
    }
    let (head, body) = data.split_at(DISCRIMINATOR_LEN);
    if head != expected {
        let mut actual = [0u8; DISCRIMINATOR_LEN];
        actual.copy_from_slice(head);
        return Err(ClientError::DiscriminatorMismatch {
            kind,
            expected: *expected,
            actual,
        });
    }
    Ok(body)
}

/// Decodes what follows the discriminator, reporting lengths against the whole buffer.
pub(crate) fn decode_body(layout: &Layout, body: &[u8]) -> Result<DecodedFields> {
    layout.decode_fields(body).map_err(|err| match err {
        ClientError::MalformedInput { expected, actual } => ClientError::MalformedInput {
            expected: expected + DISCRIMINATOR_LEN,
            actual: actual + DISCRIMINATOR_LEN,
        },
        err => err,
    })
}

/// An account kind written by the program: a discriminator followed by a fixed layout.
///
/// Records are plain values. They are produced by [AccountRecord::decode] or built field by
/// field, and [AccountRecord::encode] writes them back in the on-chain format.
pub trait AccountRecord: Sized {
    const NAME: &'static str;
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];
    const LAYOUT: Layout;
    /// Serialized size including the discriminator.
    const LEN: usize = DISCRIMINATOR_LEN + Self::LAYOUT.width();

    fn from_fields(fields: &mut DecodedFields) -> Result<Self>;

    fn to_values(&self) -> Vec<Value>;

    fn decode(data: &[u8]) -> Result<Self> {
        let body = strip_discriminator(Self::NAME, &Self::DISCRIMINATOR, data)?;
        let mut fields = decode_body(&Self::LAYOUT, body)?;
        Self::from_fields(&mut fields)
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&Self::DISCRIMINATOR);
        Self::LAYOUT.encode_into(&self.to_values(), &mut out)?;
        Ok(out)
    }
}
