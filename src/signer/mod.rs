pub mod ecdsa;
pub mod signature;


// Re-export main types for easier access
pub use ecdsa::{public_key, sign, verify};
pub use signature::Signature;
