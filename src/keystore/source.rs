use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use super::key_material::KeyMaterial;
use super::memory::MemKeystore;
use crate::errors::SignerError;

/// Where a private key is read from at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Environment variable holding the hex key (development only)
    Environment { var_name: String },
    /// File whose trimmed contents are the hex key
    File { path: PathBuf },
}

impl KeySource {
    pub fn source_type(&self) -> &'static str {
        match self {
            KeySource::Environment { .. } => "environment",
            KeySource::File { .. } => "file",
        }
    }

    /// Read and validate the key
    pub fn load(&self) -> Result<KeyMaterial, SignerError> {
        match self {
            KeySource::Environment { var_name } => {
                warn!("⚠️  SECURITY WARNING: Loading private key from environment variable");
                warn!("⚠️  Environment variables can be visible to other processes and may be logged");

                let private_key_hex = std::env::var(var_name).map_err(|_| {
                    SignerError::Config(format!("Environment variable {var_name} not set"))
                })?;
                KeyMaterial::from_hex(&private_key_hex)
            }
            KeySource::File { path } => {
                warn_on_loose_permissions(path);

                let private_key_hex = fs::read_to_string(path).map_err(|e| {
                    SignerError::Config(format!(
                        "Failed to read key file {}: {e}",
                        path.display()
                    ))
                })?;
                KeyMaterial::from_hex(&private_key_hex)
            }
        }
    }

    /// Load the key into `keystore` under `identifier`
    pub async fn load_into(
        &self,
        keystore: &MemKeystore,
        identifier: &str,
    ) -> Result<(), SignerError> {
        let key_material = self.load()?;
        info!(
            "Loaded key for '{}' from {} source (public key 0x{:x})",
            identifier,
            self.source_type(),
            key_material.public_key()
        );
        keystore.put(identifier, key_material).await;
        Ok(())
    }
}

fn warn_on_loose_permissions(path: &std::path::Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mode = metadata.permissions().mode();
            if mode & 0o077 != 0 {
                warn!(
                    "⚠️  Key file {} is accessible by other users (mode {:o}); use chmod 600",
                    path.display(),
                    mode & 0o777
                );
            }
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}
