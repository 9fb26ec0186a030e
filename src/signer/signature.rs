use serde::{de::Error, ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};
use starknet_crypto::Felt;

use crate::errors::SignerError;
use crate::felt::{felt_to_hex, parse_felt};

/// Stark ECDSA signature. Both components are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    r: Felt,
    s: Felt,
}

impl Signature {
    pub fn new(r: Felt, s: Felt) -> Result<Self, SignerError> {
        if r == Felt::ZERO || s == Felt::ZERO {
            return Err(SignerError::Crypto(
                "signature components must be non-zero".to_string(),
            ));
        }
        Ok(Self { r, s })
    }

    pub fn r(&self) -> Felt {
        self.r
    }

    pub fn s(&self) -> Felt {
        self.s
    }

    /// Wire order: `[r, s]`
    pub fn to_vec(&self) -> Vec<Felt> {
        vec![self.r, self.s]
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&felt_to_hex(&self.r))?;
        seq.serialize_element(&felt_to_hex(&self.s))?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let components = Vec::<String>::deserialize(deserializer)?;
        let [r, s] = components.as_slice() else {
            return Err(D::Error::custom(format!(
                "expected 2 signature components, got {}",
                components.len()
            )));
        };

        let r = parse_felt(r).map_err(D::Error::custom)?;
        let s = parse_felt(s).map_err(D::Error::custom)?;
        Signature::new(r, s).map_err(D::Error::custom)
    }
}
