use starknet_crypto::Felt;
use tracing::warn;

use super::types::Config;
use crate::errors::SignerError;
use crate::felt::parse_felt;
use crate::provider::chain_id_from_name;
use crate::transaction::TransactionVersion;

impl Config {
    /// Validate the configuration settings
    pub fn validate(&self) -> Result<(), SignerError> {
        self.validate_account()?;
        self.validate_keystore()?;
        self.validate_provider()?;
        Ok(())
    }

    fn validate_account(&self) -> Result<(), SignerError> {
        if self.account.address.is_empty() {
            return Err(SignerError::Config(
                "Account address is required".to_string(),
            ));
        }

        let address = parse_felt(&self.account.address)
            .map_err(|e| SignerError::Config(format!("Invalid account address: {e}")))?;
        if address == Felt::ZERO {
            return Err(SignerError::Config(
                "Account address must be non-zero".to_string(),
            ));
        }

        TransactionVersion::try_from(self.account.version)
            .map_err(|e| SignerError::Config(e.to_string()))?;

        Ok(())
    }

    fn validate_keystore(&self) -> Result<(), SignerError> {
        match self.keystore.backend.as_str() {
            "environment" => {
                if self.keystore.env_var.is_none() {
                    return Err(SignerError::Config(
                        "Environment variable name is required for environment backend".to_string(),
                    ));
                }

                warn!("⚠️  SECURITY WARNING: Environment backend configured");
                warn!("⚠️  Private keys stored in environment variables are less secure");
                warn!("⚠️  Consider using the 'file' backend with a 0600 key file");
            }
            "file" => {
                if self.keystore.path.is_none() {
                    return Err(SignerError::Config(
                        "Key file path is required for file backend".to_string(),
                    ));
                }
            }
            _ => {
                return Err(SignerError::Config(format!(
                    "Unknown keystore backend: '{}'",
                    self.keystore.backend
                )));
            }
        }

        Ok(())
    }

    fn validate_provider(&self) -> Result<(), SignerError> {
        match (&self.provider.rpc_url, &self.provider.chain_id) {
            (None, None) => {
                return Err(SignerError::Config(
                    "Either provider.rpc_url or provider.chain_id is required".to_string(),
                ));
            }
            (Some(_), Some(_)) => {
                warn!("Both rpc_url and chain_id configured; the chain id reported by the node is used");
            }
            _ => {}
        }

        if let Some(rpc_url) = &self.provider.rpc_url {
            if !rpc_url.starts_with("http://") && !rpc_url.starts_with("https://") {
                return Err(SignerError::Config(format!(
                    "RPC url must use http or https: {rpc_url}"
                )));
            }
            if rpc_url.starts_with("http://") {
                warn!("⚠️  RPC url is not using TLS: {}", rpc_url);
            }
            if self.provider.timeout_secs == 0 {
                return Err(SignerError::Config(
                    "Provider timeout must be at least one second".to_string(),
                ));
            }
        }

        if let Some(chain_id) = &self.provider.chain_id {
            chain_id_from_name(chain_id)
                .map_err(|e| SignerError::Config(format!("Invalid chain id: {e}")))?;
        }

        Ok(())
    }
}
