use starknet_crypto::Felt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::types::Config;
use crate::account::Account;
use crate::errors::SignerError;
use crate::felt::{felt_to_hex, parse_felt};
use crate::keystore::{KeySource, MemKeystore};
use crate::provider::{JsonRpcProvider, OfflineProvider, Provider};
use crate::transaction::TransactionVersion;

impl Config {
    pub fn account_address(&self) -> Result<Felt, SignerError> {
        parse_felt(&self.account.address)
    }

    /// Keystore identifier, defaulting to the hex account address
    pub fn key_id(&self) -> Result<String, SignerError> {
        match &self.account.key_id {
            Some(key_id) => Ok(key_id.clone()),
            None => Ok(felt_to_hex(&self.account_address()?)),
        }
    }

    pub fn transaction_version(&self) -> Result<TransactionVersion, SignerError> {
        TransactionVersion::try_from(self.account.version)
    }

    /// Key source from the keystore settings
    pub fn key_source(&self) -> Result<KeySource, SignerError> {
        match self.keystore.backend.as_str() {
            "environment" => {
                let var_name = self.keystore.env_var.as_ref().ok_or_else(|| {
                    SignerError::Config("Environment variable name not set".to_string())
                })?;
                Ok(KeySource::Environment {
                    var_name: var_name.clone(),
                })
            }
            "file" => {
                let path = self
                    .keystore
                    .path
                    .as_ref()
                    .ok_or_else(|| SignerError::Config("Key file path not set".to_string()))?;
                Ok(KeySource::File {
                    path: PathBuf::from(path),
                })
            }
            other => Err(SignerError::Config(format!(
                "Unknown keystore backend: '{other}'"
            ))),
        }
    }

    /// Provider from the provider settings: JSON-RPC when a url is set,
    /// otherwise an offline provider with the configured chain id
    pub fn create_provider(&self) -> Result<Arc<dyn Provider>, SignerError> {
        if let Some(rpc_url) = &self.provider.rpc_url {
            info!("Using JSON-RPC provider at {}", rpc_url);
            let provider = JsonRpcProvider::new(
                rpc_url.clone(),
                Duration::from_secs(self.provider.timeout_secs),
            )?;
            return Ok(Arc::new(provider));
        }

        let chain_id = self.provider.chain_id.as_ref().ok_or_else(|| {
            SignerError::Config("Either provider.rpc_url or provider.chain_id is required".to_string())
        })?;
        info!("Using offline provider for chain {}", chain_id);
        Ok(Arc::new(OfflineProvider::new(chain_id.clone())))
    }

    /// Load the key and assemble an account
    pub async fn build_account(&self) -> Result<Account, SignerError> {
        let address = self.account_address()?;
        let key_id = self.key_id()?;

        let keystore = Arc::new(MemKeystore::new());
        self.key_source()?.load_into(&keystore, &key_id).await?;

        Ok(Account::new(
            self.create_provider()?,
            address,
            key_id,
            keystore,
            self.transaction_version()?,
        ))
    }
}
