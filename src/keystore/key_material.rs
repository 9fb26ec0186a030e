use starknet_crypto::Felt;
use zeroize::ZeroizeOnDrop;

use crate::errors::SignerError;
use crate::felt::{felt_from_hex, parse_felt};
use crate::signer::ecdsa::validate_private_key;

/// In-memory private key that gets zeroized on drop.
///
/// Construction enforces 0 < key < curve order. The secret is only reachable
/// from inside the crate, for the duration of a signing call.
#[derive(ZeroizeOnDrop)]
pub struct KeyMaterial {
    private_key: [u8; 32],
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

impl KeyMaterial {
    pub fn from_felt(private_key: Felt) -> Result<Self, SignerError> {
        validate_private_key(&private_key)?;
        Ok(Self {
            private_key: private_key.to_bytes_be(),
        })
    }

    /// Parse a private key literal. Bare 64-digit hex strings are accepted
    /// alongside `0x` hex and decimal.
    pub fn from_hex(hex_key: &str) -> Result<Self, SignerError> {
        let hex_key = hex_key.trim();
        let bare_hex = hex_key.len() == 64 && hex_key.bytes().all(|b| b.is_ascii_hexdigit());
        let private_key = if bare_hex {
            felt_from_hex(hex_key)?
        } else {
            parse_felt(hex_key)?
        };

        Self::from_felt(private_key)
    }

    /// Public key (x coordinate) matching this private key
    pub fn public_key(&self) -> Felt {
        starknet_crypto::get_public_key(&self.secret())
    }

    pub(crate) fn secret(&self) -> Felt {
        Felt::from_bytes_be(&self.private_key)
    }
}
