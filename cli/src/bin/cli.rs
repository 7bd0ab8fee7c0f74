use access_distributor_client::{
    composite::{claim, create_distributor, ClaimAddresses, DistributorAddresses},
    error_code::lookup,
    fetch::{fetch, fetch_sol_custody},
    instructions::{DistributorInstruction, NewDistributorArgs as NewDistributorIxData},
    pda::{get_claim_status_pda, get_merkle_distributor_pda, get_sol_custody_pda},
    ClaimStatus, MerkleDistributor,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use solana_program::{hash::Hash, instruction::Instruction, pubkey::Pubkey};
use solana_rpc_client::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,

    /// RPC url
    #[clap(long, env, default_value = "http://localhost:8899")]
    pub rpc_url: String,

    /// Program id
    #[clap(long, env, default_value_t = access_distributor_client::id())]
    pub program_id: Pubkey,
}

impl Args {
    fn rpc_client(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), CommitmentConfig::confirmed())
    }
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the address of a merkle distributor
    DistributorPda(DistributorArgs),
    /// Derive the address of a claimant's claim status
    ClaimStatusPda(ClaimStatusArgs),
    /// Derive the address of an owner's sol custody
    SolCustodyPda(SolCustodyArgs),
    /// Fetch and print a merkle distributor
    ShowDistributor(DistributorArgs),
    /// Fetch and print a claim status
    ShowClaimStatus(ClaimStatusArgs),
    /// Fetch and print the balance held in an owner's sol custody
    ShowSolCustody(SolCustodyArgs),
    /// Print the instructions claiming an allocation
    ClaimIx(ClaimIxArgs),
    /// Print the instruction creating a merkle distributor
    NewDistributorIx(NewDistributorIxArgs),
    /// Decode base58 instruction data
    DecodeIx(DecodeIxArgs),
    /// Look up a custom program error code
    ExplainError(ExplainErrorArgs),
}

/// Identifies a distributor by its seeds.
#[derive(Parser, Debug)]
pub struct DistributorArgs {
    /// SPL Mint address
    #[clap(long, env)]
    pub mint: Pubkey,

    /// Distributor creator
    #[clap(long, env)]
    pub creator: Pubkey,

    #[clap(long, env)]
    pub airdrop_version: u64,
}

impl DistributorArgs {
    fn distributor(&self, program_id: &Pubkey) -> Pubkey {
        get_merkle_distributor_pda(program_id, &self.mint, &self.creator, self.airdrop_version).0
    }
}

#[derive(Parser, Debug)]
pub struct ClaimStatusArgs {
    #[clap(long, env)]
    pub distributor: Pubkey,

    #[clap(long, env)]
    pub claimant: Pubkey,
}

#[derive(Parser, Debug)]
pub struct SolCustodyArgs {
    #[clap(long, env)]
    pub owner: Pubkey,
}

#[derive(Parser, Debug)]
pub struct ClaimIxArgs {
    #[clap(flatten)]
    pub distributor: DistributorArgs,

    #[clap(long, env)]
    pub claimant: Pubkey,

    /// Amount unlocked at claim time
    #[clap(long, env, default_value_t = 0)]
    pub amount_unlocked: u64,

    /// Amount vesting between the distributor's timestamps
    #[clap(long, env, default_value_t = 0)]
    pub amount_locked: u64,

    /// Comma separated base58 proof hashes, leaf to root
    #[clap(long, env, value_delimiter = ',')]
    pub proof: Vec<Hash>,
}

#[derive(Parser, Debug)]
pub struct NewDistributorIxArgs {
    #[clap(flatten)]
    pub distributor: DistributorArgs,

    /// Base58 merkle root
    #[clap(long, env)]
    pub root: Hash,

    #[clap(long, env)]
    pub max_total_claim: u64,

    #[clap(long, env)]
    pub max_num_nodes: u64,

    /// Lockup timestamp start
    #[clap(long, env)]
    pub start_vesting_ts: i64,

    /// Lockup timestamp end (unix timestamp)
    #[clap(long, env)]
    pub end_vesting_ts: i64,
}

#[derive(Parser, Debug)]
pub struct DecodeIxArgs {
    /// Base58 instruction data, as shown by explorers
    #[clap(long, env)]
    pub data: String,
}

#[derive(Parser, Debug)]
pub struct ExplainErrorArgs {
    /// Custom error code, decimal or 0x-prefixed hex
    #[clap(long, env, value_parser = parse_error_code)]
    pub code: u32,
}

fn parse_error_code(s: &str) -> std::result::Result<u32, String> {
    match s.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    }
    .map_err(|e| format!("invalid error code {s}: {e}"))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountMetaJson {
    pubkey: String,
    is_signer: bool,
    is_writable: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstructionJson {
    program_id: String,
    accounts: Vec<AccountMetaJson>,
    /// Base58, the encoding explorers and `decode-ix` use.
    data: String,
}

impl From<&Instruction> for InstructionJson {
    fn from(ix: &Instruction) -> Self {
        Self {
            program_id: ix.program_id.to_string(),
            accounts: ix
                .accounts
                .iter()
                .map(|meta| AccountMetaJson {
                    pubkey: meta.pubkey.to_string(),
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
                .collect(),
            data: bs58::encode(&ix.data).into_string(),
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!("args: {:?}", args);

    match &args.command {
        Commands::DistributorPda(distributor_args) => {
            process_distributor_pda(&args, distributor_args)
        }
        Commands::ClaimStatusPda(claim_status_args) => {
            process_claim_status_pda(&args, claim_status_args)
        }
        Commands::SolCustodyPda(sol_custody_args) => {
            process_sol_custody_pda(&args, sol_custody_args)
        }
        Commands::ShowDistributor(distributor_args) => {
            process_show_distributor(&args, distributor_args)
        }
        Commands::ShowClaimStatus(claim_status_args) => {
            process_show_claim_status(&args, claim_status_args)
        }
        Commands::ShowSolCustody(sol_custody_args) => {
            process_show_sol_custody(&args, sol_custody_args)
        }
        Commands::ClaimIx(claim_ix_args) => process_claim_ix(&args, claim_ix_args),
        Commands::NewDistributorIx(new_distributor_args) => {
            process_new_distributor_ix(&args, new_distributor_args)
        }
        Commands::DecodeIx(decode_args) => process_decode_ix(decode_args),
        Commands::ExplainError(explain_args) => process_explain_error(explain_args),
    }
}

fn process_distributor_pda(args: &Args, distributor_args: &DistributorArgs) -> Result<()> {
    let (distributor, bump) = get_merkle_distributor_pda(
        &args.program_id,
        &distributor_args.mint,
        &distributor_args.creator,
        distributor_args.airdrop_version,
    );
    print_json(&json!({ "address": distributor.to_string(), "bump": bump }))
}

fn process_claim_status_pda(args: &Args, claim_status_args: &ClaimStatusArgs) -> Result<()> {
    let (claim_status, bump) = get_claim_status_pda(
        &args.program_id,
        &claim_status_args.claimant,
        &claim_status_args.distributor,
    );
    print_json(&json!({ "address": claim_status.to_string(), "bump": bump }))
}

fn process_sol_custody_pda(args: &Args, sol_custody_args: &SolCustodyArgs) -> Result<()> {
    let (sol_custody, bump) = get_sol_custody_pda(&args.program_id, &sol_custody_args.owner);
    print_json(&json!({ "address": sol_custody.to_string(), "bump": bump }))
}

fn process_show_distributor(args: &Args, distributor_args: &DistributorArgs) -> Result<()> {
    let distributor = distributor_args.distributor(&args.program_id);
    info!("fetching merkle distributor {distributor}");

    let state: MerkleDistributor = fetch(&args.rpc_client(), &distributor, &args.program_id)
        .with_context(|| format!("failed to read merkle distributor {distributor}"))?
        .ok_or_else(|| anyhow!("merkle distributor {distributor} not found"))?;
    print_json(&state)
}

fn process_show_claim_status(args: &Args, claim_status_args: &ClaimStatusArgs) -> Result<()> {
    let (claim_status, _bump) = get_claim_status_pda(
        &args.program_id,
        &claim_status_args.claimant,
        &claim_status_args.distributor,
    );
    info!("fetching claim status {claim_status}");

    let state: ClaimStatus = fetch(&args.rpc_client(), &claim_status, &args.program_id)
        .with_context(|| format!("failed to read claim status {claim_status}"))?
        .ok_or_else(|| anyhow!("claim status {claim_status} not found"))?;
    print_json(&json!({
        "claimStatus": state,
        "lockedAmountRemaining": state.locked_amount_remaining().to_string(),
    }))
}

fn process_show_sol_custody(args: &Args, sol_custody_args: &SolCustodyArgs) -> Result<()> {
    let owner = sol_custody_args.owner;
    let custody = fetch_sol_custody(&args.rpc_client(), &owner, &args.program_id)
        .with_context(|| format!("failed to read sol custody of {owner}"))?
        .ok_or_else(|| anyhow!("no sol custody funded for {owner}"))?;
    print_json(&custody)
}

fn process_claim_ix(args: &Args, claim_ix_args: &ClaimIxArgs) -> Result<()> {
    let distributor = claim_ix_args.distributor.distributor(&args.program_id);
    let addresses = ClaimAddresses::derive(
        &args.program_id,
        &distributor,
        &claim_ix_args.claimant,
        &claim_ix_args.distributor.mint,
    );
    let proof = claim_ix_args
        .proof
        .iter()
        .map(|hash| hash.to_bytes())
        .collect();

    let ixs = claim(
        claim_ix_args.amount_unlocked,
        claim_ix_args.amount_locked,
        proof,
        &addresses,
        &args.program_id,
    )?;
    if ixs.is_empty() {
        info!("nothing to claim");
    }
    print_json(&ixs.iter().map(InstructionJson::from).collect::<Vec<_>>())
}

fn process_new_distributor_ix(
    args: &Args,
    new_distributor_args: &NewDistributorIxArgs,
) -> Result<()> {
    let seeds = &new_distributor_args.distributor;
    let addresses = DistributorAddresses::derive(
        &args.program_id,
        &seeds.mint,
        &seeds.creator,
        seeds.airdrop_version,
    );
    info!(
        "distributor {} with token vault {}",
        addresses.distributor, addresses.token_vault
    );

    let ix = create_distributor(
        &NewDistributorIxData {
            version: seeds.airdrop_version,
            root: new_distributor_args.root.to_bytes(),
            max_total_claim: new_distributor_args.max_total_claim,
            max_num_nodes: new_distributor_args.max_num_nodes,
            start_vesting_ts: new_distributor_args.start_vesting_ts,
            end_vesting_ts: new_distributor_args.end_vesting_ts,
        },
        &seeds.mint,
        &seeds.creator,
        &addresses,
        &args.program_id,
    )?;
    print_json(&InstructionJson::from(&ix))
}

fn process_decode_ix(decode_args: &DecodeIxArgs) -> Result<()> {
    let data = bs58::decode(&decode_args.data)
        .into_vec()
        .context("instruction data is not valid base58")?;
    let ix = DistributorInstruction::unpack(&data)?;
    print_json(&ix)
}

fn process_explain_error(explain_args: &ExplainErrorArgs) -> Result<()> {
    let descriptor = lookup(explain_args.code)
        .ok_or_else(|| anyhow!("{} is not a merkle distributor error code", explain_args.code))?;
    info!("error {}", descriptor.name);
    println!("{descriptor}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_code() {
        assert_eq!(parse_error_code("6000"), Ok(6000));
        assert_eq!(parse_error_code("0x1770"), Ok(6000));
        assert!(parse_error_code("abc").is_err());
    }

    #[test]
    fn test_instruction_json() {
        let ix = Instruction {
            program_id: access_distributor_client::id(),
            accounts: vec![solana_program::instruction::AccountMeta::new(
                Pubkey::default(),
                true,
            )],
            data: vec![0, 1, 2],
        };
        let value = serde_json::to_value(InstructionJson::from(&ix)).unwrap();
        assert_eq!(value["programId"], "ADis3cccJHS6dmj8MPCG1NGGuXBN2ZSaaXFwKKU7UUgF");
        assert_eq!(value["accounts"][0]["isSigner"], true);
        assert_eq!(value["accounts"][0]["isWritable"], true);
        assert_eq!(value["data"], "15T");
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "cli",
            "sol-custody-pda",
            "--owner",
            "11111111111111111111111111111111",
        ])
        .unwrap();
        assert_eq!(args.program_id, access_distributor_client::id());
        assert!(matches!(args.command, Commands::SolCustodyPda(_)));
    }
}
