use clap::{Args, Parser, Subcommand};
use starknet_crypto::Felt;

use crate::felt::parse_felt;

#[derive(Parser)]
#[command(name = "starknet-account-signer")]
#[command(about = "Build, sign and submit Starknet invoke transactions")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the invoke transaction hash for a call list
    Hash(InvokeArgs),
    /// Build and sign an invoke transaction, printing it as JSON
    Sign(InvokeArgs),
    /// Sign (or load) an invoke transaction and submit it to the node
    Submit(SubmitArgs),
    /// Print the account's public key
    PublicKey,
}

#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SIGNER_CONFIG")]
    pub config: Option<String>,

    /// Account contract address
    #[arg(long, global = true, env = "SIGNER_ACCOUNT_ADDRESS")]
    pub address: Option<String>,

    /// Keystore identifier for the account key (defaults to the address)
    #[arg(long, global = true, env = "SIGNER_KEY_ID")]
    pub key_id: Option<String>,

    /// Invoke transaction version: 0 or 1
    #[arg(long, global = true, env = "SIGNER_TX_VERSION")]
    pub tx_version: Option<u64>,

    /// Keystore backend: "environment", "file"
    #[arg(long, global = true, env = "SIGNER_KEYSTORE_BACKEND")]
    pub keystore_backend: Option<String>,

    /// Environment variable name for private key (for environment backend)
    #[arg(long, global = true, env = "SIGNER_ENV_VAR")]
    pub env_var: Option<String>,

    /// File holding the private key (for file backend)
    #[arg(long, global = true, env = "SIGNER_KEY_FILE")]
    pub key_file: Option<String>,

    /// Starknet JSON-RPC endpoint
    #[arg(long, global = true, env = "STARKNET_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Network name or hex chain id, for offline use
    #[arg(long, global = true, env = "STARKNET_CHAIN_ID")]
    pub chain_id: Option<String>,

    /// Log level
    #[arg(long, global = true, env = "RUST_LOG")]
    pub log_level: Option<String>,
}

#[derive(Args)]
pub struct InvokeArgs {
    /// JSON file with the call list
    #[arg(long)]
    pub calls: String,

    /// Account nonce
    #[arg(long, value_parser = parse_felt_arg)]
    pub nonce: Felt,

    /// Maximum fee in wei
    #[arg(long, value_parser = parse_felt_arg)]
    pub max_fee: Felt,
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Previously signed transaction (JSON) to submit as-is
    #[arg(long, conflicts_with_all = ["calls", "nonce", "max_fee"])]
    pub transaction: Option<String>,

    /// JSON file with the call list
    #[arg(long, required_unless_present = "transaction")]
    pub calls: Option<String>,

    /// Account nonce
    #[arg(long, value_parser = parse_felt_arg, required_unless_present = "transaction")]
    pub nonce: Option<Felt>,

    /// Maximum fee in wei
    #[arg(long, value_parser = parse_felt_arg, required_unless_present = "transaction")]
    pub max_fee: Option<Felt>,
}

fn parse_felt_arg(value: &str) -> Result<Felt, String> {
    parse_felt(value).map_err(|e| e.to_string())
}
