use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing::{error, info};

use starknet_account_signer::calldata::calls_from_json;
use starknet_account_signer::felt::felt_to_hex;
use starknet_account_signer::{Account, Call, Cli, Commands, Config, InvokeTransaction};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.common)?;

    // Initialize logging on stderr so stdout stays machine-readable
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(config.logging.level.as_str())
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(e.into());
    }

    let account = config.build_account().await?;
    info!(
        "Account 0x{:x} ready (key '{}', invoke {:?})",
        account.address(),
        account.key_id(),
        account.version()
    );

    match cli.command {
        Commands::Hash(args) => {
            let calls = read_calls(&args.calls)?;
            let calldata = account.format_calldata(&calls)?;
            let hash = account
                .transaction_hash(&calldata, args.nonce, args.max_fee, account.address())
                .await?;
            println!("{}", felt_to_hex(&hash));
        }
        Commands::Sign(args) => {
            let calls = read_calls(&args.calls)?;
            let transaction = account
                .build_and_sign_invoke(&calls, args.nonce, args.max_fee, account.version())
                .await?;
            println!("{}", serde_json::to_string_pretty(&transaction)?);
        }
        Commands::Submit(args) => {
            let transaction = match &args.transaction {
                Some(path) => read_transaction(path)?,
                None => {
                    let (Some(calls_path), Some(nonce), Some(max_fee)) =
                        (&args.calls, args.nonce, args.max_fee)
                    else {
                        anyhow::bail!("--calls, --nonce and --max-fee are required without --transaction");
                    };
                    let calls = read_calls(calls_path)?;
                    account
                        .build_and_sign_invoke(&calls, nonce, max_fee, account.version())
                        .await?
                }
            };
            let result = submit(&account, &transaction).await?;
            println!("{}", felt_to_hex(&result));
        }
        Commands::PublicKey => {
            println!("{}", felt_to_hex(&account.public_key().await?));
        }
    }

    Ok(())
}

fn read_calls(path: &str) -> Result<Vec<Call>> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    Ok(calls_from_json(&json)?)
}

fn read_transaction(path: &str) -> Result<InvokeTransaction> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid transaction in {path}"))
}

async fn submit(
    account: &Account,
    transaction: &InvokeTransaction,
) -> Result<starknet_crypto::Felt> {
    match account.submit_invoke(transaction).await {
        Ok(result) => Ok(result.transaction_hash),
        Err(e) => {
            error!("Submission failed: {}", e);
            Err(e.into())
        }
    }
}
