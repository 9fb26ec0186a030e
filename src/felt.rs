//! Strict conversions between field elements and their textual and byte
//! encodings.
//!
//! Arithmetic itself is provided by [`Felt`], which reduces every result
//! modulo the Stark prime. This module guards the edges: literals and byte
//! strings that do not denote a canonical residue are rejected instead of
//! being silently reduced.

use starknet_crypto::Felt;

use crate::errors::SignerError;

/// Big-endian bytes of the field prime P = 2^251 + 17 * 2^192 + 1
const FIELD_PRIME_BE: [u8; 32] = [
    0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
];

/// Longest decimal literal that can still be below P
const MAX_DECIMAL_DIGITS: usize = 76;

/// Longest ASCII string that fits in a field element
const MAX_SHORT_STRING_LEN: usize = 31;

/// Parse a `0x`-prefixed hex literal or a decimal literal
pub fn parse_felt(input: &str) -> Result<Felt, SignerError> {
    let input = input.trim();
    if input.starts_with("0x") || input.starts_with("0X") {
        felt_from_hex(input)
    } else {
        felt_from_dec(input)
    }
}

/// Parse a hex literal, with or without the `0x` prefix
pub fn felt_from_hex(input: &str) -> Result<Felt, SignerError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if digits.is_empty() {
        return Err(SignerError::InvalidFieldEncoding(format!(
            "empty hex literal '{input}'"
        )));
    }
    if digits.len() > 64 {
        return Err(SignerError::InvalidFieldEncoding(format!(
            "hex literal '{input}' is longer than 64 digits"
        )));
    }

    let bytes = hex::decode(format!("{digits:0>64}"))?;
    felt_from_bytes_be(&bytes)
}

/// Parse an unsigned decimal literal
pub fn felt_from_dec(input: &str) -> Result<Felt, SignerError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SignerError::InvalidFieldEncoding(format!(
            "'{input}' is not a decimal literal"
        )));
    }

    let trimmed = input.trim_start_matches('0');
    let canonical = if trimmed.is_empty() { "0" } else { trimmed };
    if canonical.len() > MAX_DECIMAL_DIGITS {
        return Err(out_of_range(input));
    }

    let felt = Felt::from_dec_str(canonical).map_err(|_| out_of_range(input))?;

    // from_dec_str reduces modulo P, so a value that does not print back
    // unchanged was not a canonical residue.
    if felt.to_biguint().to_string() != canonical {
        return Err(out_of_range(input));
    }

    Ok(felt)
}

/// Minimal lowercase hex form, e.g. `0x0` or `0x534e5f4d41494e`
pub fn felt_to_hex(felt: &Felt) -> String {
    let encoded = hex::encode(felt.to_bytes_be());
    let trimmed = encoded.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{trimmed}")
    }
}

/// Interpret up to 32 big-endian bytes as a field element
pub fn felt_from_bytes_be(bytes: &[u8]) -> Result<Felt, SignerError> {
    if bytes.len() > 32 {
        return Err(SignerError::InvalidFieldEncoding(format!(
            "{} bytes do not fit in a field element",
            bytes.len()
        )));
    }

    let mut buffer = [0u8; 32];
    buffer[32 - bytes.len()..].copy_from_slice(bytes);

    if buffer >= FIELD_PRIME_BE {
        return Err(SignerError::InvalidFieldEncoding(format!(
            "0x{} is not below the field prime",
            hex::encode(buffer)
        )));
    }

    Ok(Felt::from_bytes_be(&buffer))
}

/// Encode an ASCII string of at most 31 bytes as a field element
/// (Cairo short string)
pub fn felt_from_short_string(value: &str) -> Result<Felt, SignerError> {
    if !value.is_ascii() {
        return Err(SignerError::InvalidFieldEncoding(format!(
            "short string '{value}' is not ASCII"
        )));
    }
    if value.len() > MAX_SHORT_STRING_LEN {
        return Err(SignerError::InvalidFieldEncoding(format!(
            "short string '{value}' is longer than {MAX_SHORT_STRING_LEN} bytes"
        )));
    }

    felt_from_bytes_be(value.as_bytes())
}

/// Modular inverse; zero has none
pub fn felt_inverse(felt: &Felt) -> Result<Felt, SignerError> {
    felt.inverse().ok_or_else(|| {
        SignerError::InvalidFieldEncoding("zero has no multiplicative inverse".to_string())
    })
}

fn out_of_range(input: &str) -> SignerError {
    SignerError::InvalidFieldEncoding(format!("'{input}' is not below the field prime"))
}

/// Serde adapter writing a felt as a `0x` hex string
pub mod serde_hex {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use starknet_crypto::Felt;

    pub fn serialize<S: Serializer>(value: &Felt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::felt_to_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Felt, D::Error> {
        let literal = String::deserialize(deserializer)?;
        super::parse_felt(&literal).map_err(D::Error::custom)
    }
}

/// Serde adapter for arrays of felts
pub mod serde_hex_vec {
    use serde::{de::Error, ser::SerializeSeq, Deserialize, Deserializer, Serializer};
    use starknet_crypto::Felt;

    pub fn serialize<S: Serializer>(values: &[Felt], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&super::felt_to_hex(value))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Felt>, D::Error> {
        let literals = Vec::<String>::deserialize(deserializer)?;
        literals
            .iter()
            .map(|literal| super::parse_felt(literal).map_err(D::Error::custom))
            .collect()
    }
}
