use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use starknet_crypto::Felt;
use thiserror::Error;

use crate::constants::chain_ids::KNOWN_NETWORKS;
use crate::errors::SignerError;
use crate::felt::{felt_from_hex, serde_hex};
use crate::transaction::InvokeTransaction;

pub mod classify;
pub mod jsonrpc;
pub mod offline;

// Re-export main types for easier access
pub use classify::SubmissionError;
pub use jsonrpc::JsonRpcProvider;
pub use offline::OfflineProvider;

/// Errors reported by a provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Node response to an accepted invoke submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddInvokeTransactionResult {
    #[serde(with = "serde_hex")]
    pub transaction_hash: Felt,
}

/// Network access needed by an account
#[async_trait]
pub trait Provider: Send + Sync {
    /// Network identifier, either a name such as `SN_MAIN` or a hex chain id
    async fn chain_id(&self) -> Result<String, ProviderError>;

    /// Forward a signed invoke transaction to the network
    async fn add_invoke_transaction(
        &self,
        transaction: &InvokeTransaction,
    ) -> Result<AddInvokeTransactionResult, ProviderError>;
}

/// Map a provider-reported network identifier to its chain id.
///
/// Known network names go through a fixed table; `0x` hex chain ids, as
/// returned by `starknet_chainId`, are taken as-is.
pub fn chain_id_from_name(name: &str) -> Result<Felt, SignerError> {
    if let Some((_, chain_id)) = KNOWN_NETWORKS
        .iter()
        .find(|(network, _)| *network == name)
    {
        return Ok(*chain_id);
    }

    if name.starts_with("0x") || name.starts_with("0X") {
        return felt_from_hex(name).map_err(|e| {
            SignerError::ChainIdResolutionFailed(ProviderError::InvalidResponse(e.to_string()))
        });
    }

    Err(SignerError::ChainIdResolutionFailed(
        ProviderError::InvalidResponse(format!("unknown network '{name}'")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::chain_ids;
    use starknet::macros::felt;

    #[test]
    fn test_known_network_names() {
        assert_eq!(
            chain_id_from_name("SN_MAIN").unwrap(),
            felt!("0x534e5f4d41494e")
        );
        assert_eq!(
            chain_id_from_name("SN_GOERLI").unwrap(),
            felt!("0x534e5f474f45524c49")
        );
        assert_eq!(chain_id_from_name("SN_SEPOLIA").unwrap(), chain_ids::SEPOLIA);
    }

    #[test]
    fn test_hex_chain_ids_pass_through() {
        assert_eq!(
            chain_id_from_name("0x534e5f474f45524c49").unwrap(),
            chain_ids::GOERLI
        );
    }

    #[test]
    fn test_unknown_network() {
        assert!(matches!(
            chain_id_from_name("SN_NOWHERE"),
            Err(SignerError::ChainIdResolutionFailed(_))
        ));
        assert!(matches!(
            chain_id_from_name("0xzz"),
            Err(SignerError::ChainIdResolutionFailed(_))
        ));
    }
}
