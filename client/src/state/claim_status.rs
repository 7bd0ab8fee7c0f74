use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_program::pubkey::Pubkey;

use crate::{
    layout::{DecodedFields, Field, FieldKind, Layout, Value},
    pda::get_claim_status_pda,
    state::AccountRecord,
    Result,
};

/// Holds whether or not a claimant has claimed tokens.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStatus {
    /// Authority that claimed the tokens.
    #[serde_as(as = "DisplayFromStr")]
    pub claimant: Pubkey,
    /// Locked amount
    #[serde_as(as = "DisplayFromStr")]
    pub locked_amount: u64,
    /// Locked amount withdrawn
    #[serde_as(as = "DisplayFromStr")]
    pub locked_amount_withdrawn: u64,
    /// Unlocked amount
    #[serde_as(as = "DisplayFromStr")]
    pub unlocked_amount: u64,
}

impl ClaimStatus {
    pub fn address(program_id: &Pubkey, claimant: &Pubkey, distributor: &Pubkey) -> Pubkey {
        get_claim_status_pda(program_id, claimant, distributor).0
    }

    /// Locked tokens not yet withdrawn, regardless of how many have vested.
    pub fn locked_amount_remaining(&self) -> u64 {
        self.locked_amount
            .saturating_sub(self.locked_amount_withdrawn)
    }
}

impl AccountRecord for ClaimStatus {
    const NAME: &'static str = "ClaimStatus";
    const DISCRIMINATOR: [u8; 8] = [22, 183, 249, 157, 247, 95, 150, 96];
    const LAYOUT: Layout = Layout::new(&[
        Field::new("claimant", FieldKind::Pubkey),
        Field::new("locked_amount", FieldKind::U64),
        Field::new("locked_amount_withdrawn", FieldKind::U64),
        Field::new("unlocked_amount", FieldKind::U64),
    ]);

    fn from_fields(fields: &mut DecodedFields) -> Result<Self> {
        Ok(Self {
            claimant: fields.pubkey()?,
            locked_amount: fields.u64()?,
            locked_amount_withdrawn: fields.u64()?,
            unlocked_amount: fields.u64()?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Pubkey(self.claimant),
            Value::U64(self.locked_amount),
            Value::U64(self.locked_amount_withdrawn),
            Value::U64(self.unlocked_amount),
        ]
    }
}
