pub mod account;
pub mod calldata;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod felt;
pub mod hash;
pub mod keystore;
pub mod provider;
pub mod signer;
pub mod transaction;

pub use account::Account;
pub use calldata::Call;
pub use config::Config;
pub use errors::SignerError;
pub use keystore::{Keystore, MemKeystore};
pub use provider::Provider;
pub use signer::Signature;
pub use transaction::{InvokeTransaction, TransactionVersion};

// Re-export CLI types for main.rs
pub use cli::*;
