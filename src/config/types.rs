use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub keystore: KeystoreConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Account contract address (hex)
    pub address: String,
    /// Keystore identifier; defaults to the address
    pub key_id: Option<String>,
    /// Invoke transaction version, 0 or 1
    pub version: u64,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            key_id: None,
            version: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeystoreConfig {
    pub backend: String, // "environment", "file"
    pub env_var: Option<String>, // For environment backend
    pub path: Option<String>, // For file backend
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            backend: "environment".to_string(),
            env_var: Some("SIGNER_PRIVATE_KEY".to_string()),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// JSON-RPC endpoint; without it the signer works offline
    pub rpc_url: Option<String>,
    /// Fixed network name or hex chain id for offline signing
    pub chain_id: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            chain_id: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
