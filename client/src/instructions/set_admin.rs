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
pub struct SetAdminArgs;

impl InstructionArgs for SetAdminArgs {
    const NAME: &'static str = "set_admin";
    const DISCRIMINATOR: [u8; 8] = [251, 163, 0, 52, 91, 194, 187, 92];
    const LAYOUT: Layout = Layout::new(&[]);

    fn to_values(&self) -> Vec<Value> {
        vec![]
    }

    fn from_fields(_fields: &mut DecodedFields) -> Result<Self> {
        Ok(Self)
    }
}

/// [set_admin] accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetAdminAccounts {
    /// The [MerkleDistributor](crate::state::MerkleDistributor).
    pub distributor: Pubkey,
    /// Admin signer
    pub admin: Pubkey,
    /// New admin account
    pub new_admin: Pubkey,
}

impl ToAccountMetas for SetAdminAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.distributor, false),
            AccountMeta::new(self.admin, true),
            AccountMeta::new(self.new_admin, false),
        ]
    }
}

/// Sets new admin account. The program rejects a new admin equal to the current one.
pub fn set_admin(accounts: &SetAdminAccounts, program_id: &Pubkey) -> Result<Instruction> {
    build_instruction(program_id, &SetAdminArgs, accounts)
}
