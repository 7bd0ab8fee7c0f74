//! Reading program accounts through an external transport.
//!
//! The transport only hands back raw accounts; everything here is the owner check followed by
//! the discriminator check and decode of [AccountRecord].

use solana_program::pubkey::Pubkey;
use solana_rpc_client::rpc_client::RpcClient;
use solana_sdk::account::Account;
use tracing::{debug, warn};

use crate::{
    error::ClientError,
    state::{AccountRecord, SolCustody},
    Result,
};

/// Source of raw accounts. Missing accounts are `None`, not errors.
pub trait AccountFetcher {
    fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>>;

    fn fetch_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>>;
}

impl AccountFetcher for RpcClient {
    fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        Ok(self
            .get_account_with_commitment(address, self.commitment())?
            .value)
    }

    fn fetch_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        Ok(self.get_multiple_accounts(addresses)?)
    }
}

/// Fails with [ClientError::OwnershipMismatch] unless `account` belongs to `program_id`.
pub fn check_owner(address: &Pubkey, account: &Account, program_id: &Pubkey) -> Result<()> {
    if account.owner != *program_id {
        warn!(%address, owner = %account.owner, %program_id, "account doesn't belong to this program");
        return Err(ClientError::OwnershipMismatch {
            address: *address,
            expected: *program_id,
            actual: account.owner,
        });
    }
    Ok(())
}

fn decode_owned<T: AccountRecord>(
    address: &Pubkey,
    account: Option<Account>,
    program_id: &Pubkey,
) -> Result<Option<T>> {
    let Some(account) = account else {
        debug!(%address, kind = T::NAME, "account not found");
        return Ok(None);
    };
    check_owner(address, &account, program_id)?;
    T::decode(&account.data).map(Some)
}

pub fn fetch<T: AccountRecord>(
    fetcher: &impl AccountFetcher,
    address: &Pubkey,
    program_id: &Pubkey,
) -> Result<Option<T>> {
    debug!(%address, kind = T::NAME, "fetching account");
    let account = fetcher.fetch_account(address)?;
    decode_owned(address, account, program_id)
}

/// Fetches every address in one round trip. The result lines up with `addresses`; a transport
/// answering with a different number of accounts, or any owner or decode failure, fails the
/// whole call.
pub fn fetch_multiple<T: AccountRecord>(
    fetcher: &impl AccountFetcher,
    addresses: &[Pubkey],
    program_id: &Pubkey,
) -> Result<Vec<Option<T>>> {
    debug!(count = addresses.len(), kind = T::NAME, "fetching accounts");
    let accounts = fetcher.fetch_accounts(addresses)?;
    if accounts.len() != addresses.len() {
        return Err(ClientError::AccountCountMismatch {
            expected: addresses.len(),
            actual: accounts.len(),
        });
    }
    addresses
        .iter()
        .zip(accounts)
        .map(|(address, account)| decode_owned(address, account, program_id))
        .collect()
}

/// Custody balance for `owner`. A custody address that was never funded reads as `None`.
pub fn fetch_sol_custody(
    fetcher: &impl AccountFetcher,
    owner: &Pubkey,
    program_id: &Pubkey,
) -> Result<Option<SolCustody>> {
    let address = SolCustody::address(program_id, owner);
    fetcher
        .fetch_account(&address)?
        .map(|account| SolCustody::from_account(*owner, &address, &account))
        .transpose()
}
