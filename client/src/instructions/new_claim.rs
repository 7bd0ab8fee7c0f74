use anchor_lang::ToAccountMetas;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::{
    instructions::{build_instruction, InstructionArgs},
    layout::{DecodedFields, Field, FieldKind, Layout, Value},
    Result,
};

/// Arguments for [new_claim].
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaimArgs {
    #[serde_as(as = "DisplayFromStr")]
    pub amount_unlocked: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub amount_locked: u64,
    pub proof: Vec<[u8; 32]>,
}

impl InstructionArgs for NewClaimArgs {
    const NAME: &'static str = "new_claim";
    const DISCRIMINATOR: [u8; 8] = [78, 177, 98, 123, 210, 21, 187, 83];
    const LAYOUT: Layout = Layout::new(&[
        Field::new("amount_unlocked", FieldKind::U64),
        Field::new("amount_locked", FieldKind::U64),
        Field::new("proof", FieldKind::Vec(&FieldKind::Bytes(32))),
    ]);

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::U64(self.amount_unlocked),
            Value::U64(self.amount_locked),
            Value::List(
                self.proof
                    .iter()
                    .map(|node| Value::Bytes(node.to_vec()))
                    .collect(),
            ),
        ]
    }

    fn from_fields(fields: &mut DecodedFields) -> Result<Self> {
        Ok(Self {
            amount_unlocked: fields.u64()?,
            amount_locked: fields.u64()?,
            proof: fields.hashes()?,
        })
    }
}

/// Accounts for [new_claim].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewClaimAccounts {
    /// The [MerkleDistributor](crate::state::MerkleDistributor).
    pub distributor: Pubkey,
    /// Claim status PDA
    pub claim_status: Pubkey,
    /// Distributor ATA containing the tokens to distribute.
    pub from: Pubkey,
    /// Account to send the claimed tokens to.
    pub to: Pubkey,
    /// Who is claiming the tokens.
    pub claimant: Pubkey,
    /// SPL [Token] program.
    pub token_program: Pubkey,
    /// The [System] program.
    pub system_program: Pubkey,
}

impl ToAccountMetas for NewClaimAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.distributor, false),
            AccountMeta::new(self.claim_status, false),
            AccountMeta::new(self.from, false),
            AccountMeta::new(self.to, false),
            AccountMeta::new(self.claimant, true),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

/// Initializes a claim status and transfers the unlocked part of the allocation.
pub fn new_claim(
    args: &NewClaimArgs,
    accounts: &NewClaimAccounts,
    program_id: &Pubkey,
) -> Result<Instruction> {
    build_instruction(program_id, args, accounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proof_is_length_prefixed() {
        let args = NewClaimArgs {
            amount_unlocked: 3,
            amount_locked: 5,
            proof: vec![[1; 32], [2; 32], [3; 32]],
        };
        let data = args.data().unwrap();

        assert_eq!(data.len(), 8 + 8 + 8 + 4 + 3 * 32);
        assert_eq!(&data[8..16], &3u64.to_le_bytes());
        assert_eq!(&data[16..24], &5u64.to_le_bytes());
        assert_eq!(&data[24..28], &3u32.to_le_bytes());
        assert_eq!(&data[28..60], &[1; 32]);
        assert_eq!(NewClaimArgs::unpack(&data).unwrap(), args);
    }

    #[test]
    fn test_empty_proof() {
        let args = NewClaimArgs {
            amount_unlocked: 1,
            amount_locked: 0,
            proof: vec![],
        };
        let data = args.data().unwrap();
        assert_eq!(data.len(), 8 + NewClaimArgs::LAYOUT.width());
        assert_eq!(NewClaimArgs::unpack(&data).unwrap(), args);
    }

    #[test]
    fn test_account_flags() {
        let accounts = NewClaimAccounts {
            distributor: Pubkey::new_unique(),
            claim_status: Pubkey::new_unique(),
            from: Pubkey::new_unique(),
            to: Pubkey::new_unique(),
            claimant: Pubkey::new_unique(),
            token_program: Pubkey::new_unique(),
            system_program: Pubkey::new_unique(),
        };
        let metas = accounts.to_account_metas(None);

        let signers: Vec<_> = metas.iter().filter(|m| m.is_signer).collect();
        assert_eq!(signers.len(), 1);
        assert_eq!(signers[0].pubkey, accounts.claimant);
        assert!(metas[..5].iter().all(|m| m.is_writable));
        assert!(metas[5..].iter().all(|m| !m.is_writable));
        assert_eq!(metas[1].pubkey, accounts.claim_status);
    }
}
