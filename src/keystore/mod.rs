use async_trait::async_trait;
use starknet_crypto::Felt;

use crate::errors::SignerError;
use crate::signer::Signature;

pub mod key_material;
pub mod memory;
pub mod source;


// Re-export commonly used types
pub use key_material::KeyMaterial;
pub use memory::MemKeystore;
pub use source::KeySource;

/// Owner of private keys. Keys never leave an implementation; callers only
/// get signatures and public keys back.
#[async_trait]
pub trait Keystore: Send + Sync {
    /// Sign `message_hash` with the key registered under `identifier`
    async fn sign(&self, identifier: &str, message_hash: Felt) -> Result<Signature, SignerError>;

    /// Public key for the key registered under `identifier`
    async fn public_key(&self, identifier: &str) -> Result<Felt, SignerError>;
}
