//! Client library for the Access merkle distributor program.
//!
//! The program distributes tokens to claimants proven against a [Merkle root](https://en.wikipedia.org/wiki/Merkle_tree)
//! uploaded by a distributor's creator, with part of every allocation unlocked right away and the rest vesting
//! linearly between two timestamps. It also keeps native SOL in custody for its users.
//!
//! This crate does not talk to the chain on its own. It covers:
//! - the on-chain byte formats of the program's accounts and instructions ([layout], [state], [instructions]),
//! - program-derived addresses ([pda]),
//! - instruction builders for the common flows ([composite]),
//! - the program's custom error codes ([error_code]),
//! - reading accounts through a caller-supplied transport ([fetch]).

pub mod composite;
pub mod error;
pub mod error_code;
pub mod fetch;
pub mod instructions;
pub mod layout;
pub mod pda;
pub mod state;

pub use error::ClientError;
pub use error_code::ErrorCode;
pub use fetch::AccountFetcher;
pub use state::{AccountRecord, ClaimStatus, MerkleDistributor, SolCustody};

anchor_lang::declare_id!("ADis3cccJHS6dmj8MPCG1NGGuXBN2ZSaaXFwKKU7UUgF");

pub type Result<T> = std::result::Result<T, ClientError>;
