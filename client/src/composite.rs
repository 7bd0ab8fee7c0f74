//! Builders that assemble the raw instructions for common flows.
//!
//! Address derivation is a separate step ([DistributorAddresses::derive],
//! [ClaimAddresses::derive]) so callers can cache the addresses or check them against what
//! they already know before building anything.

use anchor_spl::{
    associated_token::{self, get_associated_token_address_with_program_id},
    token,
};
use solana_program::{
    instruction::Instruction, pubkey::Pubkey, system_instruction, system_program,
};
use tracing::debug;

use crate::{
    instructions::{
        claim_locked, new_claim, new_distributor, ClaimLockedAccounts, NewClaimAccounts,
        NewClaimArgs, NewDistributorAccounts, NewDistributorArgs,
    },
    pda::{get_claim_status_pda, get_merkle_distributor_pda},
    Result,
};

/// Addresses owned by one distributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributorAddresses {
    pub distributor: Pubkey,
    pub bump: u8,
    /// Associated token account of the distributor for the mint.
    pub token_vault: Pubkey,
}

impl DistributorAddresses {
    pub fn derive(program_id: &Pubkey, mint: &Pubkey, creator: &Pubkey, version: u64) -> Self {
        Self::derive_with_token_program(program_id, mint, creator, version, &token::ID)
    }

    pub fn derive_with_token_program(
        program_id: &Pubkey,
        mint: &Pubkey,
        creator: &Pubkey,
        version: u64,
        token_program: &Pubkey,
    ) -> Self {
        let (distributor, bump) = get_merkle_distributor_pda(program_id, mint, creator, version);
        let token_vault =
            get_associated_token_address_with_program_id(&distributor, mint, token_program);
        Self {
            distributor,
            bump,
            token_vault,
        }
    }
}

/// Creates a new MerkleDistributor owned by `creator`, who pays for it and becomes its admin.
pub fn create_distributor(
    args: &NewDistributorArgs,
    mint: &Pubkey,
    creator: &Pubkey,
    addresses: &DistributorAddresses,
    program_id: &Pubkey,
) -> Result<Instruction> {
    new_distributor(
        args,
        &NewDistributorAccounts {
            distributor: addresses.distributor,
            mint: *mint,
            token_vault: addresses.token_vault,
            creator: *creator,
            system_program: system_program::ID,
            associated_token_program: associated_token::ID,
            token_program: token::ID,
        },
        program_id,
    )
}

/// Addresses a claimant touches when claiming from a distributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimAddresses {
    pub distributor: Pubkey,
    pub claimant: Pubkey,
    pub claim_status: Pubkey,
    /// Distributor vault the tokens leave from.
    pub from: Pubkey,
    /// Claimant token account the tokens go to.
    pub to: Pubkey,
    pub token_program: Pubkey,
}

impl ClaimAddresses {
    pub fn derive(
        program_id: &Pubkey,
        distributor: &Pubkey,
        claimant: &Pubkey,
        mint: &Pubkey,
    ) -> Self {
        Self::derive_with_token_program(program_id, distributor, claimant, mint, &token::ID)
    }

    /// Both token accounts are plain associated token addresses. The vault's owner is the
    /// distributor PDA, which is off curve.
    pub fn derive_with_token_program(
        program_id: &Pubkey,
        distributor: &Pubkey,
        claimant: &Pubkey,
        mint: &Pubkey,
        token_program: &Pubkey,
    ) -> Self {
        let (claim_status, _bump) = get_claim_status_pda(program_id, claimant, distributor);
        Self {
            distributor: *distributor,
            claimant: *claimant,
            claim_status,
            from: get_associated_token_address_with_program_id(distributor, mint, token_program),
            to: get_associated_token_address_with_program_id(claimant, mint, token_program),
            token_program: *token_program,
        }
    }
}

/// Claim instructions for an allocation split into unlocked and locked parts.
///
/// A zero amount contributes no instruction, so the result holds zero, one or two
/// instructions, always `new_claim` before `claim_locked`.
pub fn claim(
    amount_unlocked: u64,
    amount_locked: u64,
    proof: Vec<[u8; 32]>,
    addresses: &ClaimAddresses,
    program_id: &Pubkey,
) -> Result<Vec<Instruction>> {
    let mut ixs = Vec::with_capacity(2);

    if amount_unlocked > 0 {
        ixs.push(new_claim(
            &NewClaimArgs {
                amount_unlocked,
                amount_locked,
                proof,
            },
            &NewClaimAccounts {
                distributor: addresses.distributor,
                claim_status: addresses.claim_status,
                from: addresses.from,
                to: addresses.to,
                claimant: addresses.claimant,
                token_program: addresses.token_program,
                system_program: system_program::ID,
            },
            program_id,
        )?);
    }

    if amount_locked > 0 {
        ixs.push(claim_locked(
            &ClaimLockedAccounts {
                distributor: addresses.distributor,
                claim_status: addresses.claim_status,
                from: addresses.from,
                to: addresses.to,
                claimant: addresses.claimant,
                token_program: addresses.token_program,
            },
            program_id,
        )?);
    }

    debug!(
        claimant = %addresses.claimant,
        amount_unlocked,
        amount_locked,
        instructions = ixs.len(),
        "built claim instructions"
    );
    Ok(ixs)
}

/// Deposits lamports into `sol_custody` with a plain System transfer; the program is not
/// involved on the way in.
pub fn stake_custody_sol(
    amount_lamports: u64,
    owner: &Pubkey,
    sol_custody: &Pubkey,
) -> Instruction {
    system_instruction::transfer(owner, sol_custody, amount_lamports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        instructions::{ClaimLockedArgs, DistributorInstruction, InstructionArgs},
        pda::get_sol_custody_pda,
    };

    fn addresses() -> ClaimAddresses {
        ClaimAddresses::derive(
            &crate::id(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
        )
    }

    fn names(ixs: &[Instruction]) -> Vec<&'static str> {
        ixs.iter()
            .map(|ix| DistributorInstruction::unpack(&ix.data).unwrap().name())
            .collect()
    }

    #[test]
    fn test_claim_locked_only() {
        let ixs = claim(0, 5, vec![], &addresses(), &crate::id()).unwrap();
        assert_eq!(names(&ixs), vec!["claim_locked"]);
        assert_eq!(ixs[0].data, ClaimLockedArgs::DISCRIMINATOR.to_vec());
    }

    #[test]
    fn test_claim_unlocked_only() {
        let ixs = claim(3, 0, vec![[1; 32]], &addresses(), &crate::id()).unwrap();
        assert_eq!(names(&ixs), vec!["new_claim"]);
    }

    #[test]
    fn test_claim_nothing() {
        let ixs = claim(0, 0, vec![[1; 32]], &addresses(), &crate::id()).unwrap();
        assert!(ixs.is_empty());
    }

    #[test]
    fn test_claim_both_in_order() {
        let addresses = addresses();
        let ixs = claim(3, 5, vec![[1; 32], [2; 32]], &addresses, &crate::id()).unwrap();
        assert_eq!(names(&ixs), vec!["new_claim", "claim_locked"]);

        let DistributorInstruction::NewClaim(args) =
            DistributorInstruction::unpack(&ixs[0].data).unwrap()
        else {
            panic!("expected new_claim");
        };
        assert_eq!(args.amount_unlocked, 3);
        assert_eq!(args.amount_locked, 5);
        assert_eq!(args.proof, vec![[1; 32], [2; 32]]);

        for ix in &ixs {
            assert_eq!(ix.program_id, crate::id());
            assert_eq!(ix.accounts[1].pubkey, addresses.claim_status);
            assert_eq!(ix.accounts[4].pubkey, addresses.claimant);
        }
    }

    #[test]
    fn test_claim_addresses() {
        let program_id = crate::id();
        let distributor = Pubkey::new_unique();
        let claimant = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let addresses = ClaimAddresses::derive(&program_id, &distributor, &claimant, &mint);

        assert_eq!(
            addresses.claim_status,
            get_claim_status_pda(&program_id, &claimant, &distributor).0
        );
        assert_eq!(
            addresses.from,
            associated_token::get_associated_token_address(&distributor, &mint)
        );
        assert_eq!(
            addresses.to,
            associated_token::get_associated_token_address(&claimant, &mint)
        );
        assert_eq!(addresses.token_program, token::ID);
    }

    #[test]
    fn test_create_distributor_uses_derived_addresses() {
        let program_id = crate::id();
        let mint = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let addresses = DistributorAddresses::derive(&program_id, &mint, &creator, 1);
        let args = NewDistributorArgs {
            version: 1,
            root: [0; 32],
            max_total_claim: 1_000,
            max_num_nodes: 10,
            start_vesting_ts: 100,
            end_vesting_ts: 200,
        };
        let ix = create_distributor(&args, &mint, &creator, &addresses, &program_id).unwrap();

        assert_eq!(ix.accounts[0].pubkey, addresses.distributor);
        assert_eq!(ix.accounts[1].pubkey, mint);
        assert_eq!(ix.accounts[2].pubkey, addresses.token_vault);
        assert_eq!(ix.accounts[3].pubkey, creator);
        assert_eq!(ix.accounts[5].pubkey, associated_token::ID);
        assert_eq!(
            addresses.token_vault,
            associated_token::get_associated_token_address(&addresses.distributor, &mint)
        );
        assert_eq!(NewDistributorArgs::unpack(&ix.data).unwrap(), args);
    }

    #[test]
    fn test_stake_custody_sol_is_system_transfer() {
        let owner = Pubkey::new_unique();
        let (custody, _) = get_sol_custody_pda(&crate::id(), &owner);
        let ix = stake_custody_sol(10, &owner, &custody);

        assert_eq!(ix.program_id, system_program::ID);
        assert_eq!(ix.accounts[0].pubkey, owner);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[1].pubkey, custody);
    }
}
