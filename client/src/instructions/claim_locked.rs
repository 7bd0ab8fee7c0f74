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
pub struct ClaimLockedArgs;

impl InstructionArgs for ClaimLockedArgs {
    const NAME: &'static str = "claim_locked";
    const DISCRIMINATOR: [u8; 8] = [34, 206, 181, 23, 11, 207, 147, 90];
    const LAYOUT: Layout = Layout::new(&[]);

    fn to_values(&self) -> Vec<Value> {
        vec![]
    }

    fn from_fields(_fields: &mut DecodedFields) -> Result<Self> {
        Ok(Self)
    }
}

/// Accounts for [claim_locked].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimLockedAccounts {
    /// The [MerkleDistributor](crate::state::MerkleDistributor).
    pub distributor: Pubkey,
    /// Claim Status PDA
    pub claim_status: Pubkey,
    /// Distributor ATA containing the tokens to distribute.
    pub from: Pubkey,
    /// Account to send the claimed tokens to.
    /// Claimant must sign the transaction and can only claim on behalf of themself
    pub to: Pubkey,
    /// Who is claiming the tokens.
    pub claimant: Pubkey,
    /// SPL [Token] program.
    pub token_program: Pubkey,
}

impl ToAccountMetas for ClaimLockedAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.distributor, false),
            AccountMeta::new(self.claim_status, false),
            AccountMeta::new(self.from, false),
            AccountMeta::new(self.to, false),
            AccountMeta::new(self.claimant, true),
            AccountMeta::new_readonly(self.token_program, false),
        ]
    }
}

/// Claim locked tokens as they become unlocked.
pub fn claim_locked(accounts: &ClaimLockedAccounts, program_id: &Pubkey) -> Result<Instruction> {
    build_instruction(program_id, &ClaimLockedArgs, accounts)
}
