use solana_program::pubkey::Pubkey;
use tracing::debug;

pub const MERKLE_DISTRIBUTOR_SEED: &[u8] = b"MerkleDistributor";
pub const CLAIM_STATUS_SEED: &[u8] = b"ClaimStatus";
pub const SOL_CUSTODY_SEED: &[u8] = b"SolCustody";

pub fn get_merkle_distributor_pda(
    program_id: &Pubkey,
    mint: &Pubkey,
    creator: &Pubkey,
    version: u64,
) -> (Pubkey, u8) {
    let (address, bump) = Pubkey::find_program_address(
        &[
            MERKLE_DISTRIBUTOR_SEED,
            mint.as_ref(),
            creator.as_ref(),
            version.to_le_bytes().as_ref(),
        ],
        program_id,
    );
    debug!(%mint, %creator, version, %address, "derived merkle distributor address");
    (address, bump)
}

pub fn get_claim_status_pda(
    program_id: &Pubkey,
    claimant: &Pubkey,
    distributor: &Pubkey,
) -> (Pubkey, u8) {
    let (address, bump) = Pubkey::find_program_address(
        &[
            CLAIM_STATUS_SEED,
            claimant.to_bytes().as_ref(),
            distributor.to_bytes().as_ref(),
        ],
        program_id,
    );
    debug!(%claimant, %distributor, %address, "derived claim status address");
    (address, bump)
}

pub fn get_sol_custody_pda(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    let (address, bump) =
        Pubkey::find_program_address(&[SOL_CUSTODY_SEED, owner.as_ref()], program_id);
    debug!(%owner, %address, "derived sol custody address");
    (address, bump)
}
