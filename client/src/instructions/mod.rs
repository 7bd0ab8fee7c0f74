//! Raw instruction builders, one module per program instruction.
//!
//! Every builder pairs an argument struct ([InstructionArgs]) with an accounts struct
//! ([ToAccountMetas]). Account order is whatever the program declares; it is passed through
//! as is and never validated here.

pub use claim_locked::*;
pub use clawback::*;
pub use new_claim::*;
pub use new_distributor::*;
pub use set_admin::*;
pub use withdraw_custody_sol::*;
pub mod claim_locked;
pub mod clawback;
pub mod new_claim;
pub mod new_distributor;
pub mod set_admin;
pub mod withdraw_custody_sol;

use anchor_lang::ToAccountMetas;
use serde::Serialize;
use solana_program::{instruction::Instruction, pubkey::Pubkey};
use tracing::debug;

use crate::{
    layout::{DecodedFields, Layout, Value},
    state::{decode_body, strip_discriminator, DISCRIMINATOR_LEN},
    ClientError, Result,
};

/// Arguments of one program instruction and how they are laid out after its discriminator.
pub trait InstructionArgs: Sized {
    const NAME: &'static str;
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];
    const LAYOUT: Layout;

    fn to_values(&self) -> Vec<Value>;

    fn from_fields(fields: &mut DecodedFields) -> Result<Self>;

    /// Instruction data: discriminator followed by the encoded arguments.
    fn data(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(DISCRIMINATOR_LEN + Self::LAYOUT.width());
        data.extend_from_slice(&Self::DISCRIMINATOR);
        Self::LAYOUT.encode_into(&self.to_values(), &mut data)?;
        Ok(data)
    }

    fn unpack(data: &[u8]) -> Result<Self> {
        let body = strip_discriminator(Self::NAME, &Self::DISCRIMINATOR, data)?;
        let mut fields = decode_body(&Self::LAYOUT, body)?;
        Self::from_fields(&mut fields)
    }
}

pub fn build_instruction<A: InstructionArgs>(
    program_id: &Pubkey,
    args: &A,
    accounts: &impl ToAccountMetas,
) -> Result<Instruction> {
    let data = args.data()?;
    let accounts = accounts.to_account_metas(None);
    debug!(
        instruction = A::NAME,
        accounts = accounts.len(),
        data_len = data.len(),
        "built instruction"
    );
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Any instruction the program accepts, decoded from its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "instruction", content = "args", rename_all = "snake_case")]
pub enum DistributorInstruction {
    NewDistributor(NewDistributorArgs),
    NewClaim(NewClaimArgs),
    ClaimLocked(ClaimLockedArgs),
    Clawback(ClawbackArgs),
    SetAdmin(SetAdminArgs),
    WithdrawCustodySol(WithdrawCustodySolArgs),
}

impl DistributorInstruction {
    pub fn unpack(data: &[u8]) -> Result<Self> {
        let discriminator: [u8; DISCRIMINATOR_LEN] = data
            .get(..DISCRIMINATOR_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(ClientError::MalformedInput {
                expected: DISCRIMINATOR_LEN,
                actual: data.len(),
            })?;

        let ix = match discriminator {
            d if d == NewDistributorArgs::DISCRIMINATOR => {
                Self::NewDistributor(NewDistributorArgs::unpack(data)?)
            }
            d if d == NewClaimArgs::DISCRIMINATOR => Self::NewClaim(NewClaimArgs::unpack(data)?),
            d if d == ClaimLockedArgs::DISCRIMINATOR => {
                Self::ClaimLocked(ClaimLockedArgs::unpack(data)?)
            }
            d if d == ClawbackArgs::DISCRIMINATOR => Self::Clawback(ClawbackArgs::unpack(data)?),
            d if d == SetAdminArgs::DISCRIMINATOR => Self::SetAdmin(SetAdminArgs::unpack(data)?),
            d if d == WithdrawCustodySolArgs::DISCRIMINATOR => {
                Self::WithdrawCustodySol(WithdrawCustodySolArgs::unpack(data)?)
            }
            other => return Err(ClientError::UnknownInstruction(other)),
        };
        Ok(ix)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NewDistributor(_) => NewDistributorArgs::NAME,
            Self::NewClaim(_) => NewClaimArgs::NAME,
            Self::ClaimLocked(_) => ClaimLockedArgs::NAME,
            Self::Clawback(_) => ClawbackArgs::NAME,
            Self::SetAdmin(_) => SetAdminArgs::NAME,
            Self::WithdrawCustodySol(_) => WithdrawCustodySolArgs::NAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use solana_program::hash::hash;

    use super::*;

    fn sighash(name: &str) -> [u8; 8] {
        let mut out = [0u8; 8];
        out.copy_from_slice(&hash(format!("global:{name}").as_bytes()).to_bytes()[..8]);
        out
    }

    #[test]
    fn test_discriminators_follow_anchor_sighash() {
        assert_eq!(
            sighash("new_distributor"),
            NewDistributorArgs::DISCRIMINATOR
        );
        assert_eq!(sighash("new_claim"), NewClaimArgs::DISCRIMINATOR);
        assert_eq!(sighash("claim_locked"), ClaimLockedArgs::DISCRIMINATOR);
        assert_eq!(sighash("clawback"), ClawbackArgs::DISCRIMINATOR);
        assert_eq!(sighash("set_admin"), SetAdminArgs::DISCRIMINATOR);
        assert_eq!(
            sighash("withdraw_custody_sol"),
            WithdrawCustodySolArgs::DISCRIMINATOR
        );
    }

    #[test]
    fn test_unpack_dispatches_on_discriminator() {
        let args = NewClaimArgs {
            amount_unlocked: 3,
            amount_locked: 5,
            proof: vec![[9; 32]],
        };
        let ix = DistributorInstruction::unpack(&args.data().unwrap()).unwrap();
        assert_eq!(ix, DistributorInstruction::NewClaim(args));
        assert_eq!(ix.name(), "new_claim");

        let ix = DistributorInstruction::unpack(&ClawbackArgs.data().unwrap()).unwrap();
        assert_eq!(ix, DistributorInstruction::Clawback(ClawbackArgs));
    }

    #[test]
    fn test_unpack_unknown_and_short() {
        assert!(matches!(
            DistributorInstruction::unpack(&[0; 8]),
            Err(ClientError::UnknownInstruction([0, 0, 0, 0, 0, 0, 0, 0]))
        ));
        assert!(matches!(
            DistributorInstruction::unpack(&[1, 2, 3]),
            Err(ClientError::MalformedInput { expected: 8, actual: 3 })
        ));

        // withdraw_custody_sol without its amount
        assert!(matches!(
            DistributorInstruction::unpack(&WithdrawCustodySolArgs::DISCRIMINATOR),
            Err(ClientError::MalformedInput { expected: 16, actual: 8 })
        ));
    }

    #[test]
    fn test_json_names_the_instruction() {
        let ix = DistributorInstruction::WithdrawCustodySol(WithdrawCustodySolArgs {
            amount_lamports: 7,
        });
        assert_eq!(
            serde_json::to_value(&ix).unwrap(),
            serde_json::json!({
                "instruction": "withdraw_custody_sol",
                "args": { "amountLamports": "7" },
            })
        );
    }

    #[test]
    fn test_args_reject_other_discriminator() {
        let data = ClawbackArgs.data().unwrap();
        assert!(matches!(
            ClaimLockedArgs::unpack(&data),
            Err(ClientError::DiscriminatorMismatch { kind: "claim_locked", .. })
        ));
    }
}
