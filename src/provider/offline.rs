use async_trait::async_trait;

use super::{AddInvokeTransactionResult, Provider, ProviderError};
use crate::transaction::InvokeTransaction;

/// Provider with a fixed network identifier and no network access.
/// Lets transactions be built and signed on an air-gapped machine.
#[derive(Debug, Clone)]
pub struct OfflineProvider {
    chain_id: String,
}

impl OfflineProvider {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
        }
    }
}

#[async_trait]
impl Provider for OfflineProvider {
    async fn chain_id(&self) -> Result<String, ProviderError> {
        Ok(self.chain_id.clone())
    }

    async fn add_invoke_transaction(
        &self,
        _transaction: &InvokeTransaction,
    ) -> Result<AddInvokeTransactionResult, ProviderError> {
        Err(ProviderError::Unsupported(
            "offline provider cannot submit transactions".to_string(),
        ))
    }
}
