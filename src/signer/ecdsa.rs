use starknet_crypto::{get_public_key, rfc6979_generate_k, Felt, SignError};
use tracing::debug;

use super::signature::Signature;
use crate::constants::curve::{EC_ORDER, MESSAGE_HASH_BITS};
use crate::errors::SignerError;

/// Largest permitted leading byte of a message hash, i.e. hash < 2^251
const MESSAGE_HASH_LEADING_BYTE_LIMIT: u8 = 1 << (MESSAGE_HASH_BITS - 248);

/// Sign a message hash with a private key.
///
/// The nonce is derived deterministically (RFC 6979, HMAC-SHA256) from the
/// key and the hash. When the curve rejects a candidate nonce the derivation
/// is repeated with an incrementing seed, so identical inputs always produce
/// identical signatures.
pub fn sign(message_hash: &Felt, private_key: &Felt) -> Result<Signature, SignerError> {
    validate_private_key(private_key)?;
    validate_message_hash(message_hash)?;

    let mut seed: Option<Felt> = None;
    loop {
        let k = rfc6979_generate_k(message_hash, private_key, seed.as_ref());
        match starknet_crypto::sign(private_key, message_hash, &k) {
            Ok(signature) => return Signature::new(signature.r, signature.s),
            Err(SignError::InvalidK) => {
                debug!("Nonce rejected by curve, retrying with next seed");
                seed = Some(seed.map_or(Felt::ONE, |prev| prev + Felt::ONE));
            }
            Err(e) => {
                return Err(SignerError::InvalidHashRange(format!("{e:?}")));
            }
        }
    }
}

/// Check a signature against a public key. Malformed inputs verify as false.
pub fn verify(message_hash: &Felt, signature: &Signature, public_key: &Felt) -> bool {
    starknet_crypto::verify(public_key, message_hash, &signature.r(), &signature.s())
        .unwrap_or(false)
}

/// Derive the public key (x coordinate) for a private key
pub fn public_key(private_key: &Felt) -> Result<Felt, SignerError> {
    validate_private_key(private_key)?;
    Ok(get_public_key(private_key))
}

pub(crate) fn validate_private_key(private_key: &Felt) -> Result<(), SignerError> {
    if *private_key == Felt::ZERO {
        return Err(SignerError::InvalidKeyRange(
            "private key must be non-zero".to_string(),
        ));
    }
    if private_key.to_bytes_be() >= EC_ORDER.to_bytes_be() {
        return Err(SignerError::InvalidKeyRange(
            "private key must be below the curve order".to_string(),
        ));
    }
    Ok(())
}

fn validate_message_hash(message_hash: &Felt) -> Result<(), SignerError> {
    if *message_hash == Felt::ZERO {
        return Err(SignerError::InvalidHashRange(
            "message hash must be non-zero".to_string(),
        ));
    }
    if message_hash.to_bytes_be()[0] >= MESSAGE_HASH_LEADING_BYTE_LIMIT {
        return Err(SignerError::InvalidHashRange(format!(
            "message hash must be below 2^{MESSAGE_HASH_BITS}"
        )));
    }
    Ok(())
}
