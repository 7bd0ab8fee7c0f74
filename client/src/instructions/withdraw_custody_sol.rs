use anchor_lang::ToAccountMetas;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::{
    instructions::{build_instruction, InstructionArgs},
    layout::{DecodedFields, Field, FieldKind, Layout, Value},
    pda::get_sol_custody_pda,
    Result,
};

/// Arguments for [withdraw_custody_sol].
#[serde_as]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawCustodySolArgs {
    #[serde_as(as = "DisplayFromStr")]
    pub amount_lamports: u64,
}

impl InstructionArgs for WithdrawCustodySolArgs {
    const NAME: &'static str = "withdraw_custody_sol";
    const DISCRIMINATOR: [u8; 8] = [118, 134, 84, 39, 59, 124, 217, 154];
    const LAYOUT: Layout = Layout::new(&[Field::new("amount_lamports", FieldKind::U64)]);

    fn to_values(&self) -> Vec<Value> {
        vec![Value::U64(self.amount_lamports)]
    }

    fn from_fields(fields: &mut DecodedFields) -> Result<Self> {
        Ok(Self {
            amount_lamports: fields.u64()?,
        })
    }
}

/// Accounts for [withdraw_custody_sol].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawCustodySolAccounts {
    /// [SolCustody](crate::state::SolCustody).
    pub sol_custody: Pubkey,
    /// The owner of the sol custody.
    pub owner: Pubkey,
    pub system_program: Pubkey,
}

impl WithdrawCustodySolAccounts {
    /// Accounts for `owner`'s own custody address.
    pub fn for_owner(owner: Pubkey, program_id: &Pubkey) -> Self {
        Self {
            sol_custody: get_sol_custody_pda(program_id, &owner).0,
            owner,
            system_program: system_program::ID,
        }
    }
}

impl ToAccountMetas for WithdrawCustodySolAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.sol_custody, false),
            AccountMeta::new(self.owner, true),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

/// Moves lamports out of the custody account back to its owner.
pub fn withdraw_custody_sol(
    args: &WithdrawCustodySolArgs,
    accounts: &WithdrawCustodySolAccounts,
    program_id: &Pubkey,
) -> Result<Instruction> {
    build_instruction(program_id, args, accounts)
}
