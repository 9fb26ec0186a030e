use async_trait::async_trait;
use starknet_crypto::Felt;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::key_material::KeyMaterial;
use super::Keystore;
use crate::errors::SignerError;
use crate::signer::{self, Signature};

/// In-memory keystore mapping identifiers to private keys.
///
/// Writers hold the lock for a whole insert, so readers never observe a
/// partially written key.
#[derive(Default)]
pub struct MemKeystore {
    keys: RwLock<HashMap<String, KeyMaterial>>,
}

impl std::fmt::Debug for MemKeystore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemKeystore").finish_non_exhaustive()
    }
}

impl MemKeystore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key, replacing any key already stored under `identifier`
    pub async fn put(&self, identifier: impl Into<String>, key_material: KeyMaterial) {
        let identifier = identifier.into();
        debug!("Registering key for '{}'", identifier);
        self.keys.write().await.insert(identifier, key_material);
    }

    pub async fn contains(&self, identifier: &str) -> bool {
        self.keys.read().await.contains_key(identifier)
    }

    /// Drop a key. Returns whether one was present.
    pub async fn remove(&self, identifier: &str) -> bool {
        self.keys.write().await.remove(identifier).is_some()
    }

    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }
}

#[async_trait]
impl Keystore for MemKeystore {
    async fn sign(&self, identifier: &str, message_hash: Felt) -> Result<Signature, SignerError> {
        let keys = self.keys.read().await;
        let key_material = keys
            .get(identifier)
            .ok_or_else(|| SignerError::KeyNotFound(identifier.to_string()))?;

        debug!("Signing message hash 0x{:x} for '{}'", message_hash, identifier);
        signer::sign(&message_hash, &key_material.secret())
    }

    async fn public_key(&self, identifier: &str) -> Result<Felt, SignerError> {
        self.keys
            .read()
            .await
            .get(identifier)
            .map(KeyMaterial::public_key)
            .ok_or_else(|| SignerError::KeyNotFound(identifier.to_string()))
    }
}
