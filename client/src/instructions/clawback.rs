use anchor_lang::ToAccountMetas;
use serde::{Deserialize, Serialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::{
    instructions::{build_instruction, InstructionArgs},
    layout::{DecodedFields, Layout, Value},
    Result,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClawbackArgs;

impl InstructionArgs for ClawbackArgs {
    const NAME: &'static str = "clawback";
    const DISCRIMINATOR: [u8; 8] = [111, 92, 142, 79, 33, 234, 82, 27];
    const LAYOUT: Layout = Layout::new(&[]);

    fn to_values(&self) -> Vec<Value> {
        vec![]
    }

    fn from_fields(_fields: &mut DecodedFields) -> Result<Self> {
        Ok(Self)
    }
}

/// [clawback] accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClawbackAccounts {
    /// The [MerkleDistributor](crate::state::MerkleDistributor).
    pub distributor: Pubkey,
    /// Distributor ATA containing the tokens to distribute.
    pub from: Pubkey,
    /// The Clawback token account.
    pub to: Pubkey,
    /// Admin account
    /// Only admin can claw back
    pub admin: Pubkey,
    /// The [System] program.
    pub system_program: Pubkey,
    /// SPL [Token] program.
    pub token_program: Pubkey,
}

impl ToAccountMetas for ClawbackAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.distributor, false),
            AccountMeta::new(self.from, false),
            AccountMeta::new(self.to, false),
            AccountMeta::new(self.admin, true),
            AccountMeta::new_readonly(self.system_program, false),
            AccountMeta::new_readonly(self.token_program, false),
        ]
    }
}

/// Claws back unclaimed tokens by:
/// 1. Transferring remaining funds from the vault to the clawback receiver
/// 2. Marking the distributor as clawed back
pub fn clawback(accounts: &ClawbackAccounts, program_id: &Pubkey) -> Result<Instruction> {
    build_instruction(program_id, &ClawbackArgs, accounts)
}
