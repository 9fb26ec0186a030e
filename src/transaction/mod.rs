pub mod hash;
pub mod types;


// Re-export main types for easier access
pub use hash::compute_invoke_hash;
pub use types::{InvokeTransaction, TransactionType, TransactionVersion};
