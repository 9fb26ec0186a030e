use anyhow::Result;
use std::fs;

use super::types::*;
use crate::cli::CommonArgs;
use crate::errors::SignerError;

impl Config {
    /// Load configuration from an optional config file, then apply CLI
    /// arguments on top. Explicit CLI arguments always win.
    pub fn load(cli: &CommonArgs) -> Result<Self> {
        let mut config = match &cli.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli);
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(config_path: &str) -> Result<Self, SignerError> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            SignerError::Config(format!("Failed to read config file {config_path}: {e}"))
        })?;

        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self, SignerError> {
        toml::from_str(content)
            .map_err(|e| SignerError::Config(format!("Failed to parse config file: {e}")))
    }

    fn apply_cli_overrides(&mut self, cli: &CommonArgs) {
        if let Some(address) = &cli.address {
            self.account.address = address.clone();
        }
        if let Some(key_id) = &cli.key_id {
            self.account.key_id = Some(key_id.clone());
        }
        if let Some(version) = cli.tx_version {
            self.account.version = version;
        }

        if let Some(backend) = &cli.keystore_backend {
            self.keystore.backend = backend.clone();
        }
        if let Some(env_var) = &cli.env_var {
            self.keystore.env_var = Some(env_var.clone());
        }
        if let Some(path) = &cli.key_file {
            self.keystore.path = Some(path.clone());
            // A key file on the command line implies the file backend
            if cli.keystore_backend.is_none() {
                self.keystore.backend = "file".to_string();
            }
        }

        if let Some(rpc_url) = &cli.rpc_url {
            self.provider.rpc_url = Some(rpc_url.clone());
        }
        if let Some(chain_id) = &cli.chain_id {
            self.provider.chain_id = Some(chain_id.clone());
        }

        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
    }
}
