use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use starknet_crypto::Felt;

use super::hash::compute_invoke_hash;
use crate::errors::SignerError;
use crate::felt::{felt_to_hex, parse_felt, serde_hex, serde_hex_vec};
use crate::signer::Signature;

/// Invoke transaction version, which selects the hashed field set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionVersion {
    V0,
    #[default]
    V1,
}

impl TransactionVersion {
    pub fn as_felt(&self) -> Felt {
        match self {
            TransactionVersion::V0 => Felt::ZERO,
            TransactionVersion::V1 => Felt::ONE,
        }
    }
}

impl TryFrom<u64> for TransactionVersion {
    type Error = SignerError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TransactionVersion::V0),
            1 => Ok(TransactionVersion::V1),
            other => Err(SignerError::InvalidRequest(format!(
                "unsupported invoke transaction version {other}"
            ))),
        }
    }
}

impl TryFrom<Felt> for TransactionVersion {
    type Error = SignerError;

    fn try_from(value: Felt) -> Result<Self, Self::Error> {
        if value == Felt::ZERO {
            Ok(TransactionVersion::V0)
        } else if value == Felt::ONE {
            Ok(TransactionVersion::V1)
        } else {
            Err(SignerError::InvalidRequest(format!(
                "unsupported invoke transaction version {}",
                felt_to_hex(&value)
            )))
        }
    }
}

impl Serialize for TransactionVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&felt_to_hex(&self.as_felt()))
    }
}

impl<'de> Deserialize<'de> for TransactionVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        let felt = parse_felt(&literal).map_err(D::Error::custom)?;
        TransactionVersion::try_from(felt).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "INVOKE")]
    Invoke,
}

/// Wire form of an invoke transaction.
///
/// Every field is fixed at construction; only the signature can be added
/// later, and only once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeTransaction {
    #[serde(with = "serde_hex")]
    sender_address: Felt,
    #[serde(with = "serde_hex_vec")]
    calldata: Vec<Felt>,
    #[serde(with = "serde_hex")]
    nonce: Felt,
    #[serde(with = "serde_hex")]
    max_fee: Felt,
    version: TransactionVersion,
    #[serde(rename = "type")]
    tx_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<Signature>,
}

impl InvokeTransaction {
    pub fn new(
        sender_address: Felt,
        calldata: Vec<Felt>,
        nonce: Felt,
        max_fee: Felt,
        version: TransactionVersion,
    ) -> Self {
        Self {
            sender_address,
            calldata,
            nonce,
            max_fee,
            version,
            tx_type: TransactionType::Invoke,
            signature: None,
        }
    }

    pub fn sender_address(&self) -> Felt {
        self.sender_address
    }

    pub fn calldata(&self) -> &[Felt] {
        &self.calldata
    }

    pub fn nonce(&self) -> Felt {
        self.nonce
    }

    pub fn max_fee(&self) -> Felt {
        self.max_fee
    }

    pub fn version(&self) -> TransactionVersion {
        self.version
    }

    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Hash of the transaction on the given chain, recomputed on every call
    pub fn hash(&self, chain_id: Felt) -> Felt {
        compute_invoke_hash(
            self.version,
            &self.calldata,
            self.nonce,
            self.max_fee,
            self.sender_address,
            chain_id,
        )
    }

    pub fn attach_signature(&mut self, signature: Signature) -> Result<(), SignerError> {
        if self.signature.is_some() {
            return Err(SignerError::InvalidRequest(
                "transaction is already signed".to_string(),
            ));
        }
        self.signature = Some(signature);
        Ok(())
    }
}
