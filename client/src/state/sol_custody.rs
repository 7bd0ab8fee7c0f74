use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_program::{pubkey::Pubkey, system_program};
use solana_sdk::account::Account;

use crate::{error::ClientError, pda::get_sol_custody_pda, Result};

/// Native SOL held in custody for an owner.
///
/// The custody account is a bare lamport bucket at a program-derived address. The program
/// never writes data into it, so it stays owned by the System program and carries no
/// discriminator: the record is just the balance.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolCustody {
    /// Wallet allowed to withdraw.
    #[serde_as(as = "DisplayFromStr")]
    pub owner: Pubkey,
    /// Balance held, in lamports.
    #[serde_as(as = "DisplayFromStr")]
    pub lamports: u64,
}

impl SolCustody {
    pub fn address(program_id: &Pubkey, owner: &Pubkey) -> Pubkey {
        get_sol_custody_pda(program_id, owner).0
    }

    /// Reads the custody balance from a fetched account.
    pub fn from_account(owner: Pubkey, address: &Pubkey, account: &Account) -> Result<Self> {
        if account.owner != system_program::ID {
            return Err(ClientError::OwnershipMismatch {
                address: *address,
                expected: system_program::ID,
                actual: account.owner,
            });
        }
        Ok(Self {
            owner,
            lamports: account.lamports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_system_account() {
        let owner = Pubkey::new_unique();
        let address = SolCustody::address(&crate::id(), &owner);
        let account = Account::new(42_000, 0, &system_program::ID);

        let custody = SolCustody::from_account(owner, &address, &account).unwrap();
        assert_eq!(custody.lamports, 42_000);
        assert_eq!(custody.owner, owner);
    }

    #[test]
    fn test_program_owned_account_is_rejected() {
        let owner = Pubkey::new_unique();
        let address = SolCustody::address(&crate::id(), &owner);
        let account = Account::new(1, 0, &crate::id());

        let err = SolCustody::from_account(owner, &address, &account).unwrap_err();
        assert!(matches!(
            err,
            ClientError::OwnershipMismatch { address: a, actual, .. }
                if a == address && actual == crate::id()
        ));
    }

    #[test]
    fn test_json_uses_strings() {
        let custody = SolCustody {
            owner: Pubkey::default(),
            lamports: u64::MAX,
        };
        let json = serde_json::to_value(&custody).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "owner": "11111111111111111111111111111111",
                "lamports": "18446744073709551615",
            })
        );
        assert_eq!(serde_json::from_value::<SolCustody>(json).unwrap(), custody);

        assert!(serde_json::from_str::<SolCustody>(r#"{"owner":"nope","lamports":"1"}"#).is_err());
        assert!(serde_json::from_str::<SolCustody>(
            r#"{"owner":"11111111111111111111111111111111","lamports":1}"#
        )
        .is_err());
    }
}
