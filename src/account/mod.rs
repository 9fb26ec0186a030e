use starknet_crypto::Felt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::calldata::{format_calldata, Call};
use crate::errors::SignerError;
use crate::keystore::Keystore;
use crate::provider::{
    chain_id_from_name, AddInvokeTransactionResult, Provider, ProviderError, SubmissionError,
};
use crate::signer::Signature;
use crate::transaction::{compute_invoke_hash, InvokeTransaction, TransactionVersion};

#[cfg(test)]
mod tests;

/// A Starknet account bound to a provider and a keystore.
///
/// The chain id is fetched from the provider on first use and cached for the
/// lifetime of the account. Concurrent first uses share a single resolution;
/// a failed or cancelled resolution leaves the cache empty so the next call
/// tries again.
pub struct Account {
    provider: Arc<dyn Provider>,
    keystore: Arc<dyn Keystore>,
    address: Felt,
    key_id: String,
    version: TransactionVersion,
    chain_id: OnceCell<Felt>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &format_args!("0x{:x}", self.address))
            .field("key_id", &self.key_id)
            .field("version", &self.version)
            .field("chain_id", &self.chain_id.get())
            .finish_non_exhaustive()
    }
}

impl Account {
    pub fn new(
        provider: Arc<dyn Provider>,
        address: Felt,
        key_id: impl Into<String>,
        keystore: Arc<dyn Keystore>,
        version: TransactionVersion,
    ) -> Self {
        Self {
            provider,
            keystore,
            address,
            key_id: key_id.into(),
            version,
            chain_id: OnceCell::new(),
        }
    }

    pub fn address(&self) -> Felt {
        self.address
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn version(&self) -> TransactionVersion {
        self.version
    }

    /// Chain id if it has already been resolved
    pub fn cached_chain_id(&self) -> Option<Felt> {
        self.chain_id.get().copied()
    }

    /// Chain id, resolved through the provider on first use
    pub async fn chain_id(&self) -> Result<Felt, SignerError> {
        self.chain_id
            .get_or_try_init(|| async {
                let network = self
                    .provider
                    .chain_id()
                    .await
                    .map_err(SignerError::ChainIdResolutionFailed)?;
                let chain_id = chain_id_from_name(&network)?;
                info!("Resolved chain id {} (0x{:x})", network, chain_id);
                Ok::<_, SignerError>(chain_id)
            })
            .await
            .copied()
    }

    /// Flatten calls into `__execute__` calldata
    pub fn format_calldata(&self, calls: &[Call]) -> Result<Vec<Felt>, SignerError> {
        format_calldata(calls)
    }

    /// Invoke transaction hash for this account's version and chain
    pub async fn transaction_hash(
        &self,
        calldata: &[Felt],
        nonce: Felt,
        max_fee: Felt,
        sender_address: Felt,
    ) -> Result<Felt, SignerError> {
        let chain_id = self.chain_id().await?;
        Ok(compute_invoke_hash(
            self.version,
            calldata,
            nonce,
            max_fee,
            sender_address,
            chain_id,
        ))
    }

    /// Sign a message hash with this account's key
    pub async fn sign(&self, message_hash: Felt) -> Result<Signature, SignerError> {
        self.keystore.sign(&self.key_id, message_hash).await
    }

    pub async fn public_key(&self) -> Result<Felt, SignerError> {
        self.keystore.public_key(&self.key_id).await
    }

    /// Format `calls`, hash the resulting transaction and sign it
    pub async fn build_and_sign_invoke(
        &self,
        calls: &[Call],
        nonce: Felt,
        max_fee: Felt,
        version: TransactionVersion,
    ) -> Result<InvokeTransaction, SignerError> {
        let calldata = self.format_calldata(calls)?;
        let chain_id = self.chain_id().await?;

        let mut transaction = InvokeTransaction::new(self.address, calldata, nonce, max_fee, version);
        let transaction_hash = transaction.hash(chain_id);
        debug!(
            "Computed invoke v{} hash 0x{:x} for {} calls",
            version.as_felt(),
            transaction_hash,
            calls.len()
        );

        let signature = self.sign(transaction_hash).await?;
        transaction.attach_signature(signature)?;

        Ok(transaction)
    }

    /// Forward a signed transaction to the provider
    pub async fn submit_invoke(
        &self,
        transaction: &InvokeTransaction,
    ) -> Result<AddInvokeTransactionResult, SignerError> {
        if !transaction.is_signed() {
            return Err(SignerError::InvalidRequest(
                "transaction must be signed before submission".to_string(),
            ));
        }

        let result = self
            .provider
            .add_invoke_transaction(transaction)
            .await
            .map_err(|e| match e {
                ProviderError::Rpc { message, .. } => {
                    SignerError::SubmissionRejected(SubmissionError::classify(&message))
                }
                other => SignerError::Provider(other),
            })?;

        info!(
            "Submitted invoke transaction 0x{:x}",
            result.transaction_hash
        );
        Ok(result)
    }

    /// Build, sign and submit in one step, using the account's version
    pub async fn execute(
        &self,
        calls: &[Call],
        nonce: Felt,
        max_fee: Felt,
    ) -> Result<AddInvokeTransactionResult, SignerError> {
        let transaction = self
            .build_and_sign_invoke(calls, nonce, max_fee, self.version)
            .await?;
        self.submit_invoke(&transaction).await
    }
}
