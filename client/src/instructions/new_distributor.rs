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

/// Arguments for [new_distributor].
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDistributorArgs {
    #[serde_as(as = "DisplayFromStr")]
    pub version: u64,
    pub root: [u8; 32],
    #[serde_as(as = "DisplayFromStr")]
    pub max_total_claim: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub max_num_nodes: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub start_vesting_ts: i64,
    #[serde_as(as = "DisplayFromStr")]
    pub end_vesting_ts: i64,
}

impl InstructionArgs for NewDistributorArgs {
    const NAME: &'static str = "new_distributor";
    const DISCRIMINATOR: [u8; 8] = [32, 139, 112, 171, 0, 2, 225, 155];
    const LAYOUT: Layout = Layout::new(&[
        Field::new("version", FieldKind::U64),
        Field::new("root", FieldKind::Bytes(32)),
        Field::new("max_total_claim", FieldKind::U64),
        Field::new("max_num_nodes", FieldKind::U64),
        Field::new("start_vesting_ts", FieldKind::I64),
        Field::new("end_vesting_ts", FieldKind::I64),
    ]);

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::U64(self.version),
            Value::Bytes(self.root.to_vec()),
            Value::U64(self.max_total_claim),
            Value::U64(self.max_num_nodes),
            Value::I64(self.start_vesting_ts),
            Value::I64(self.end_vesting_ts),
        ]
    }

    fn from_fields(fields: &mut DecodedFields) -> Result<Self> {
        Ok(Self {
            version: fields.u64()?,
            root: fields.bytes()?,
            max_total_claim: fields.u64()?,
            max_num_nodes: fields.u64()?,
            start_vesting_ts: fields.i64()?,
            end_vesting_ts: fields.i64()?,
        })
    }
}

/// Accounts for [new_distributor].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewDistributorAccounts {
    /// [MerkleDistributor](crate::state::MerkleDistributor).
    pub distributor: Pubkey,
    /// The mint to distribute.
    pub mint: Pubkey,
    /// Token vault
    pub token_vault: Pubkey,
    /// Creator wallet, responsible for creating the distributor and paying for the transaction.
    /// Also is set as the admin
    pub creator: Pubkey,
    /// The [System] program.
    pub system_program: Pubkey,
    /// The [Associated Token] program.
    pub associated_token_program: Pubkey,
    /// The [Token] program.
    pub token_program: Pubkey,
}

impl ToAccountMetas for NewDistributorAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.distributor, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new_readonly(self.token_vault, false),
            AccountMeta::new(self.creator, true),
            AccountMeta::new_readonly(self.system_program, false),
            AccountMeta::new_readonly(self.associated_token_program, false),
            AccountMeta::new_readonly(self.token_program, false),
        ]
    }
}

/// Creates a new MerkleDistributor.
/// After creating this MerkleDistributor, the token_vault should be seeded with max_total_claim tokens.
pub fn new_distributor(
    args: &NewDistributorArgs,
    accounts: &NewDistributorAccounts,
    program_id: &Pubkey,
) -> Result<Instruction> {
    build_instruction(program_id, args, accounts)
}
