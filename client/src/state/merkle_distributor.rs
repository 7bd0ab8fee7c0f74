use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_program::pubkey::Pubkey;

use crate::{
    layout::{DecodedFields, Field, FieldKind, Layout, Value},
    pda::get_merkle_distributor_pda,
    state::AccountRecord,
    Result,
};

/// State for the account which distributes tokens.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerkleDistributor {
    /// Bump seed.
    pub bump: u8,
    /// Version of the airdrop
    #[serde_as(as = "DisplayFromStr")]
    pub version: u64,
    /// The 256-bit merkle root.
    pub root: [u8; 32],
    /// [Mint] of the token to be distributed.
    #[serde_as(as = "DisplayFromStr")]
    pub mint: Pubkey,
    /// Token Address of the vault
    #[serde_as(as = "DisplayFromStr")]
    pub token_vault: Pubkey,
    /// Maximum number of tokens that can ever be claimed from this [MerkleDistributor].
    #[serde_as(as = "DisplayFromStr")]
    pub max_total_claim: u64,
    /// Maximum number of nodes in [MerkleDistributor].
    #[serde_as(as = "DisplayFromStr")]
    pub max_num_nodes: u64,
    /// Total amount of tokens that have been claimed.
    #[serde_as(as = "DisplayFromStr")]
    pub total_amount_claimed: u64,
    /// Number of nodes that have been claimed.
    #[serde_as(as = "DisplayFromStr")]
    pub num_nodes_claimed: u64,
    /// Lockup time start (Unix Timestamp)
    #[serde_as(as = "DisplayFromStr")]
    pub start_ts: i64,
    /// Lockup time end (Unix Timestamp)
    #[serde_as(as = "DisplayFromStr")]
    pub end_ts: i64,
    /// Creator wallet
    #[serde_as(as = "DisplayFromStr")]
    pub creator: Pubkey,
    /// Admin wallet
    #[serde_as(as = "DisplayFromStr")]
    pub admin: Pubkey,
    /// Whether or not the distributor has been clawed back
    pub clawed_back: bool,
}

impl MerkleDistributor {
    pub fn address(program_id: &Pubkey, mint: &Pubkey, creator: &Pubkey, version: u64) -> Pubkey {
        get_merkle_distributor_pda(program_id, mint, creator, version).0
    }
}

impl AccountRecord for MerkleDistributor {
    const NAME: &'static str = "MerkleDistributor";
    const DISCRIMINATOR: [u8; 8] = [77, 119, 139, 70, 84, 247, 12, 26];
    const LAYOUT: Layout = Layout::new(&[
        Field::new("bump", FieldKind::U8),
        Field::new("version", FieldKind::U64),
        Field::new("root", FieldKind::Bytes(32)),
        Field::new("mint", FieldKind::Pubkey),
        Field::new("token_vault", FieldKind::Pubkey),
        Field::new("max_total_claim", FieldKind::U64),
        Field::new("max_num_nodes", FieldKind::U64),
        Field::new("total_amount_claimed", FieldKind::U64),
        Field::new("num_nodes_claimed", FieldKind::U64),
        Field::new("start_ts", FieldKind::I64),
        Field::new("end_ts", FieldKind::I64),
        Field::new("creator", FieldKind::Pubkey),
        Field::new("admin", FieldKind::Pubkey),
        Field::new("clawed_back", FieldKind::Bool),
    ]);

    fn from_fields(fields: &mut DecodedFields) -> Result<Self> {
        Ok(Self {
            bump: fields.u8()?,
            version: fields.u64()?,
            root: fields.bytes()?,
            mint: fields.pubkey()?,
            token_vault: fields.pubkey()?,
            max_total_claim: fields.u64()?,
            max_num_nodes: fields.u64()?,
            total_amount_claimed: fields.u64()?,
            num_nodes_claimed: fields.u64()?,
            start_ts: fields.i64()?,
            end_ts: fields.i64()?,
            creator: fields.pubkey()?,
            admin: fields.pubkey()?,
            clawed_back: fields.bool()?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::U8(self.bump),
            Value::U64(self.version),
            Value::Bytes(self.root.to_vec()),
            Value::Pubkey(self.mint),
            Value::Pubkey(self.token_vault),
            Value::U64(self.max_total_claim),
            Value::U64(self.max_num_nodes),
            Value::U64(self.total_amount_claimed),
            Value::U64(self.num_nodes_claimed),
            Value::I64(self.start_ts),
            Value::I64(self.end_ts),
            Value::Pubkey(self.creator),
            Value::Pubkey(self.admin),
            Value::Bool(self.clawed_back),
        ]
    }
}

#[cfg(test)]
mod tests {
    use solana_program::hash::hash;

    use super::*;
    use crate::error::ClientError;

    fn sample() -> MerkleDistributor {
        MerkleDistributor {
            bump: 254,
            version: 1,
            root: [3; 32],
            mint: Pubkey::new_unique(),
            token_vault: Pubkey::new_unique(),
            max_total_claim: 1000,
            max_num_nodes: 10,
            total_amount_claimed: 0,
            num_nodes_claimed: 0,
            start_ts: 100,
            end_ts: 200,
            creator: Pubkey::new_unique(),
            admin: Pubkey::new_unique(),
            clawed_back: false,
        }
    }

    #[test]
    fn test_discriminator_is_anchor_account_hash() {
        assert_eq!(
            hash(b"account:MerkleDistributor").to_bytes()[..8],
            MerkleDistributor::DISCRIMINATOR
        );
    }

    #[test]
    fn test_len() {
        assert_eq!(MerkleDistributor::LAYOUT.width(), 218);
        assert_eq!(MerkleDistributor::LEN, 226);
    }

    #[test]
    fn test_encode_decode_keeps_every_field() {
        let distributor = sample();
        let bytes = distributor.encode().unwrap();

        assert_eq!(bytes.len(), MerkleDistributor::LEN);
        assert_eq!(&bytes[..8], &MerkleDistributor::DISCRIMINATOR);
        assert_eq!(*bytes.last().unwrap(), 0);

        let decoded = MerkleDistributor::decode(&bytes).unwrap();
        assert_eq!(decoded, distributor);
        assert!(!decoded.clawed_back);
        assert_eq!(decoded.version, 1);
        assert_eq!(decoded.max_total_claim, 1000);
        assert_eq!(decoded.max_num_nodes, 10);
        assert_eq!(decoded.start_ts, 100);
        assert_eq!(decoded.end_ts, 200);
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let distributor = MerkleDistributor {
            clawed_back: true,
            ..sample()
        };
        let mut bytes = distributor.encode().unwrap();
        bytes.extend_from_slice(&[0xff; 16]);
        assert_eq!(MerkleDistributor::decode(&bytes).unwrap(), distributor);
    }

    #[test]
    fn test_wrong_discriminator_is_rejected() {
        let mut bytes = sample().encode().unwrap();
        bytes[0] ^= 0xff;
        assert!(matches!(
            MerkleDistributor::decode(&bytes),
            Err(ClientError::DiscriminatorMismatch { kind: "MerkleDistributor", .. })
        ));

        // a claim status buffer is not a distributor, whatever its length
        let mut other = crate::state::ClaimStatus::DISCRIMINATOR.to_vec();
        other.resize(MerkleDistributor::LEN, 0);
        assert!(matches!(
            MerkleDistributor::decode(&other),
            Err(ClientError::DiscriminatorMismatch { .. })
        ));
        assert!(matches!(
            MerkleDistributor::decode(&other[..9]),
            Err(ClientError::DiscriminatorMismatch { .. })
        ));
    }

    #[test]
    fn test_short_buffer_is_malformed() {
        let bytes = sample().encode().unwrap();
        for len in [0, 7, 8, 9, 100, MerkleDistributor::LEN - 1] {
            assert!(
                matches!(
                    MerkleDistributor::decode(&bytes[..len]),
                    Err(ClientError::MalformedInput { expected, actual })
                        if actual == len && expected > len
                ),
                "len {len}"
            );
        }
    }

    #[test]
    fn test_json_shape() {
        let distributor = sample();
        let json = serde_json::to_value(&distributor).unwrap();

        assert_eq!(json["version"], "1");
        assert_eq!(json["maxTotalClaim"], "1000");
        assert_eq!(json["startTs"], "100");
        assert_eq!(json["clawedBack"], false);
        assert_eq!(json["mint"], distributor.mint.to_string());
        assert_eq!(json["root"].as_array().unwrap().len(), 32);

        let back: MerkleDistributor = serde_json::from_value(json).unwrap();
        assert_eq!(back, distributor);
    }

    #[test]
    fn test_address_matches_pda_helper() {
        let distributor = sample();
        assert_eq!(
            MerkleDistributor::address(
                &crate::id(),
                &distributor.mint,
                &distributor.creator,
                distributor.version
            ),
            get_merkle_distributor_pda(
                &crate::id(),
                &distributor.mint,
                &distributor.creator,
                distributor.version
            )
            .0
        );
    }
}
