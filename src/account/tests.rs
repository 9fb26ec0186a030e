use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use starknet::macros::felt;
use starknet_crypto::Felt;

use super::Account;
use crate::calldata::Call;
use crate::errors::SignerError;
use crate::keystore::{KeyMaterial, MemKeystore};
use crate::provider::{AddInvokeTransactionResult, Provider, ProviderError, SubmissionError};
use crate::signer;
use crate::transaction::{InvokeTransaction, TransactionVersion};

const ETH: Felt = felt!("0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7");
const SENDER: Felt = felt!("0x043784df59268c02b716e20bf77797bd96c68c2f100b2a634e448c35e3ad363e");
const SENDER_KEY: &str = "0x043b7fe9d91942c98cd5fd37579bd99ec74f879c4c79d886633eecae9dad35fa";

struct MockProvider {
    network: String,
    chain_id_calls: AtomicUsize,
    failures_before_success: usize,
    first_call_delay: Option<Duration>,
    submit_response: Result<AddInvokeTransactionResult, ProviderError>,
    submitted: Mutex<Vec<InvokeTransaction>>,
}

impl MockProvider {
    fn new(network: &str) -> Self {
        Self {
            network: network.to_string(),
            chain_id_calls: AtomicUsize::new(0),
            failures_before_success: 0,
            first_call_delay: None,
            submit_response: Ok(AddInvokeTransactionResult {
                transaction_hash: felt!("0x1234"),
            }),
            submitted: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.chain_id_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn chain_id(&self) -> Result<String, ProviderError> {
        let call = self.chain_id_calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            if let Some(delay) = self.first_call_delay {
                tokio::time::sleep(delay).await;
            }
        }
        if call < self.failures_before_success {
            return Err(ProviderError::Transport("connection refused".to_string()));
        }
        Ok(self.network.clone())
    }

    async fn add_invoke_transaction(
        &self,
        transaction: &InvokeTransaction,
    ) -> Result<AddInvokeTransactionResult, ProviderError> {
        self.submitted.lock().unwrap().push(transaction.clone());
        self.submit_response.clone()
    }
}

async fn keystore_with(identifier: &str, private_key: &str) -> Arc<MemKeystore> {
    let keystore = Arc::new(MemKeystore::new());
    keystore
        .put(identifier, KeyMaterial::from_hex(private_key).unwrap())
        .await;
    keystore
}

async fn goerli_account(provider: Arc<MockProvider>) -> Account {
    let key_id = format!("0x{:x}", SENDER);
    let keystore = keystore_with(&key_id, SENDER_KEY).await;
    Account::new(provider, SENDER, key_id, keystore, TransactionVersion::V1)
}

fn transfer_call() -> Call {
    Call::by_name(ETH, "transfer", vec![ETH, felt!("0x1"), felt!("0x0")]).unwrap()
}

#[tokio::test]
async fn test_chain_id_from_network_name() {
    let mainnet = Account::new(
        Arc::new(MockProvider::new("SN_MAIN")),
        Felt::ZERO,
        "pubkey",
        Arc::new(MemKeystore::new()),
        TransactionVersion::V1,
    );
    assert_eq!(mainnet.chain_id().await.unwrap(), felt!("0x534e5f4d41494e"));

    let goerli = Account::new(
        Arc::new(MockProvider::new("SN_GOERLI")),
        Felt::ZERO,
        "pubkey",
        Arc::new(MemKeystore::new()),
        TransactionVersion::V1,
    );
    assert_eq!(goerli.chain_id().await.unwrap(), felt!("0x534e5f474f45524c49"));
}

#[tokio::test]
async fn test_chain_id_is_cached() {
    let provider = Arc::new(MockProvider::new("SN_GOERLI"));
    let account = goerli_account(provider.clone()).await;
    assert_eq!(account.cached_chain_id(), None);

    account.chain_id().await.unwrap();
    account.chain_id().await.unwrap();
    account
        .transaction_hash(&[], Felt::ZERO, Felt::ZERO, SENDER)
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);
    assert_eq!(account.cached_chain_id(), Some(felt!("0x534e5f474f45524c49")));
}

#[tokio::test]
async fn test_concurrent_resolution_converges() {
    let mut provider = MockProvider::new("SN_MAIN");
    provider.first_call_delay = Some(Duration::from_millis(20));
    let provider = Arc::new(provider);
    let account = Arc::new(goerli_account(provider.clone()).await);

    let mut handles = Vec::new();
    for _ in 0..32 {
        let account = account.clone();
        handles.push(tokio::spawn(async move { account.chain_id().await.unwrap() }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), felt!("0x534e5f4d41494e"));
    }
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_failed_resolution_is_not_cached() {
    let mut provider = MockProvider::new("SN_GOERLI");
    provider.failures_before_success = 1;
    let provider = Arc::new(provider);
    let account = goerli_account(provider.clone()).await;

    let result = account.chain_id().await;
    assert!(matches!(
        result,
        Err(SignerError::ChainIdResolutionFailed(ProviderError::Transport(_)))
    ));
    assert_eq!(account.cached_chain_id(), None);

    assert_eq!(account.chain_id().await.unwrap(), felt!("0x534e5f474f45524c49"));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_cancelled_resolution_leaves_cache_empty() {
    let mut provider = MockProvider::new("SN_GOERLI");
    provider.first_call_delay = Some(Duration::from_secs(5));
    let provider = Arc::new(provider);
    let account = goerli_account(provider.clone()).await;

    let timed_out = tokio::time::timeout(Duration::from_millis(10), account.chain_id()).await;
    assert!(timed_out.is_err());
    assert_eq!(account.cached_chain_id(), None);

    assert_eq!(account.chain_id().await.unwrap(), felt!("0x534e5f474f45524c49"));
}

#[tokio::test]
async fn test_unknown_network_fails_resolution() {
    let provider = Arc::new(MockProvider::new("SN_NOWHERE"));
    let account = goerli_account(provider).await;

    assert!(matches!(
        account.chain_id().await,
        Err(SignerError::ChainIdResolutionFailed(_))
    ));
}

#[tokio::test]
async fn test_transaction_hash_matches_testnet() {
    let account = goerli_account(Arc::new(MockProvider::new("SN_GOERLI"))).await;
    let calldata = account.format_calldata(&[transfer_call()]).unwrap();

    let hash = account
        .transaction_hash(&calldata, felt!("0x2"), felt!("0x574fbde6000"), account.address())
        .await
        .unwrap();

    assert_eq!(
        hash,
        felt!("0x73cf79c4bfa0c7a41f473c07e1be5ac25faa7c2fdf9edcbd12c1438f40f13d8")
    );
}

#[tokio::test]
async fn test_sign_with_account_key() {
    let address = felt!("0x476466998f22e0b0177ddc76afcf8e3b5d30164f3eb33031aae7a9cb63c831");
    let key_id = format!("0x{:x}", address);
    let keystore = keystore_with(
        &key_id,
        "0x15d0b81e6140f4cce02b47609879a723f9f5b7b9f3ffca346018c73fe81847e",
    )
    .await;
    let account = Account::new(
        Arc::new(MockProvider::new("SN_GOERLI")),
        address,
        key_id,
        keystore,
        TransactionVersion::V1,
    );

    let signature = account
        .sign(felt!("0x2a7eec54aab835323a810e893354368a496f1a217e8b6ef295476568ef08f0d"))
        .await
        .unwrap();

    assert_eq!(
        signature.r(),
        felt!("0x6bf7980d98fa300ed9565b8cd5efcf5582133daa961b5e1d9477bf1bd750727")
    );
    assert_eq!(
        signature.s(),
        felt!("0x5886b8236b7dc3665c0014876a644ddd0800a167ff1036fb82af1a6f4134c91")
    );
}

#[tokio::test]
async fn test_sign_without_registered_key() {
    let account = Account::new(
        Arc::new(MockProvider::new("SN_GOERLI")),
        SENDER,
        "unknown",
        Arc::new(MemKeystore::new()),
        TransactionVersion::V1,
    );

    assert!(matches!(
        account.sign(felt!("0x1")).await,
        Err(SignerError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn test_build_and_sign_invoke() {
    let account = goerli_account(Arc::new(MockProvider::new("SN_GOERLI"))).await;

    let transaction = account
        .build_and_sign_invoke(
            &[transfer_call()],
            felt!("0x2"),
            felt!("0x574fbde6000"),
            TransactionVersion::V1,
        )
        .await
        .unwrap();

    let transaction_hash = transaction.hash(account.chain_id().await.unwrap());
    assert_eq!(
        transaction_hash,
        felt!("0x73cf79c4bfa0c7a41f473c07e1be5ac25faa7c2fdf9edcbd12c1438f40f13d8")
    );

    let signature = transaction.signature().unwrap();
    assert_eq!(
        signature.r(),
        felt!("0x10d405427040655f118bc8b897e2f2f8147858bbcb0e3d6bc6dfbc6d0205e8")
    );
    assert_eq!(
        signature.s(),
        felt!("0x5cdfe4a3d5b63002e9011ec0ba59ae2b75a43cb2a3bc1699b35aa64cb9ca3cf")
    );

    let public_key = account.public_key().await.unwrap();
    assert!(signer::verify(&transaction_hash, signature, &public_key));

    let json = serde_json::to_value(&transaction).unwrap();
    assert_eq!(json["type"], "INVOKE");
    assert_eq!(json["version"], "0x1");
    assert_eq!(json["calldata"].as_array().unwrap().len(), 9);
    assert_eq!(json["signature"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_changed_nonce_gets_fresh_hash_and_signature() {
    let account = goerli_account(Arc::new(MockProvider::new("SN_GOERLI"))).await;
    let chain_id = account.chain_id().await.unwrap();

    let first = account
        .build_and_sign_invoke(&[transfer_call()], felt!("0x2"), felt!("0x574fbde6000"), TransactionVersion::V1)
        .await
        .unwrap();
    let second = account
        .build_and_sign_invoke(&[transfer_call()], felt!("0x3"), felt!("0x574fbde6000"), TransactionVersion::V1)
        .await
        .unwrap();

    assert_ne!(first.hash(chain_id), second.hash(chain_id));
    assert_ne!(first.signature(), second.signature());

    let public_key = account.public_key().await.unwrap();
    assert!(signer::verify(
        &second.hash(chain_id),
        second.signature().unwrap(),
        &public_key
    ));
}

#[tokio::test]
async fn test_build_rejects_empty_call_list() {
    let account = goerli_account(Arc::new(MockProvider::new("SN_GOERLI"))).await;

    let result = account
        .build_and_sign_invoke(&[], Felt::ZERO, Felt::ZERO, TransactionVersion::V1)
        .await;
    assert!(matches!(result, Err(SignerError::InvalidCall(_))));
}

#[tokio::test]
async fn test_execute_submits_signed_transaction() {
    let provider = Arc::new(MockProvider::new("SN_GOERLI"));
    let account = goerli_account(provider.clone()).await;

    let result = account
        .execute(&[transfer_call()], felt!("0x2"), felt!("0x574fbde6000"))
        .await
        .unwrap();

    assert_eq!(result.transaction_hash, felt!("0x1234"));
    let submitted = provider.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert!(submitted[0].is_signed());
    assert_eq!(submitted[0].sender_address(), SENDER);
}

#[tokio::test]
async fn test_submit_requires_signature() {
    let provider = Arc::new(MockProvider::new("SN_GOERLI"));
    let account = goerli_account(provider.clone()).await;
    let unsigned = InvokeTransaction::new(
        SENDER,
        vec![Felt::ONE],
        Felt::ZERO,
        Felt::ZERO,
        TransactionVersion::V1,
    );

    assert!(matches!(
        account.submit_invoke(&unsigned).await,
        Err(SignerError::InvalidRequest(_))
    ));
    assert!(provider.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_submission_errors_are_classified() {
    let cases = [
        (
            ProviderError::Rpc {
                code: 52,
                message: "Invalid transaction nonce".to_string(),
            },
            Some(SubmissionError::InvalidTransactionNonce),
        ),
        (
            ProviderError::Rpc {
                code: 28,
                message: "Class hash not found".to_string(),
            },
            Some(SubmissionError::ClassHashNotFound),
        ),
        (
            ProviderError::Rpc {
                code: -1,
                message: "node is syncing".to_string(),
            },
            Some(SubmissionError::Unclassified("node is syncing".to_string())),
        ),
        (ProviderError::Transport("timeout".to_string()), None),
    ];

    for (provider_error, expected) in cases {
        let mut provider = MockProvider::new("SN_GOERLI");
        provider.submit_response = Err(provider_error);
        let account = goerli_account(Arc::new(provider)).await;

        let result = account
            .execute(&[transfer_call()], felt!("0x2"), felt!("0x574fbde6000"))
            .await;

        match (result, expected) {
            (Err(SignerError::SubmissionRejected(actual)), Some(expected)) => {
                assert_eq!(actual, expected)
            }
            (Err(SignerError::Provider(ProviderError::Transport(_))), None) => {}
            (other, expected) => panic!("unexpected result {other:?}, expected {expected:?}"),
        }
    }
}
