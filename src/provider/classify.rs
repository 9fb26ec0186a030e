use thiserror::Error;

/// Known reasons a node refuses a transaction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("invalid contract class")]
    InvalidContractClass,

    #[error("class hash not found")]
    ClassHashNotFound,

    #[error("invalid transaction nonce")]
    InvalidTransactionNonce,

    #[error("max fee is smaller than the minimal transaction cost")]
    InsufficientMaxFee,

    #[error("account balance is smaller than the transaction's max fee")]
    InsufficientAccountBalance,

    #[error("account validation failed")]
    ValidationFailure,

    #[error("transaction already exists in the mempool")]
    DuplicateTransaction,

    #[error("{0}")]
    Unclassified(String),
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Rule {
    fn matches(&self, message: &str) -> bool {
        match self {
            Rule::Exact(expected) => message.eq_ignore_ascii_case(expected),
            Rule::Prefix(prefix) => message
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
        }
    }
}

/// Classification table, first match wins
const RULES: &[(Rule, SubmissionError)] = &[
    (Rule::Prefix("Invalid contract class"), SubmissionError::InvalidContractClass),
    (Rule::Prefix("Class hash not found"), SubmissionError::ClassHashNotFound),
    (Rule::Prefix("Invalid transaction nonce"), SubmissionError::InvalidTransactionNonce),
    (Rule::Prefix("Max fee is smaller than"), SubmissionError::InsufficientMaxFee),
    (Rule::Prefix("Account balance is smaller than"), SubmissionError::InsufficientAccountBalance),
    (Rule::Prefix("Account validation failed"), SubmissionError::ValidationFailure),
    (Rule::Exact("Validation failure"), SubmissionError::ValidationFailure),
    (Rule::Prefix("A transaction with the same hash already exists"), SubmissionError::DuplicateTransaction),
];

impl SubmissionError {
    /// Classify a raw node error message. Unmatched messages are kept verbatim.
    pub fn classify(message: &str) -> Self {
        let trimmed = message.trim();
        RULES
            .iter()
            .find(|(rule, _)| rule.matches(trimmed))
            .map(|(_, error)| error.clone())
            .unwrap_or_else(|| SubmissionError::Unclassified(message.to_string()))
    }
}
