use thiserror::Error;

use crate::provider::{ProviderError, SubmissionError};

#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Invalid field encoding: {0}")]
    InvalidFieldEncoding(String),

    #[error("No key registered for identifier '{0}'")]
    KeyNotFound(String),

    #[error("Private key out of range: {0}")]
    InvalidKeyRange(String),

    #[error("Message hash out of range: {0}")]
    InvalidHashRange(String),

    #[error("Invalid call: {0}")]
    InvalidCall(String),

    #[error("Chain id resolution failed: {0}")]
    ChainIdResolutionFailed(#[source] ProviderError),

    #[error("Transaction rejected: {0}")]
    SubmissionRejected(#[from] SubmissionError),

    #[error("Provider error: {0}")]
    Provider(#[source] ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for SignerError {
    fn from(err: anyhow::Error) -> Self {
        SignerError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for SignerError {
    fn from(err: serde_json::Error) -> Self {
        SignerError::InvalidRequest(err.to_string())
    }
}

impl From<hex::FromHexError> for SignerError {
    fn from(err: hex::FromHexError) -> Self {
        SignerError::InvalidFieldEncoding(format!("Hex decode error: {err}"))
    }
}
