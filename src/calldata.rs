use serde::{Deserialize, Serialize};
use starknet::core::utils::get_selector_from_name;
use starknet_crypto::Felt;
use tracing::debug;

use crate::errors::SignerError;
use crate::felt::parse_felt;

/// A single contract call bundled into an account multicall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub to: Felt,
    pub selector: Felt,
    pub calldata: Vec<Felt>,
}

impl Call {
    pub fn new(to: Felt, selector: Felt, calldata: Vec<Felt>) -> Self {
        Self {
            to,
            selector,
            calldata,
        }
    }

    /// Build a call addressing an entry point by name
    pub fn by_name(to: Felt, entry_point: &str, calldata: Vec<Felt>) -> Result<Self, SignerError> {
        let selector = get_selector_from_name(entry_point).map_err(|e| {
            SignerError::InvalidCall(format!("invalid entry point '{entry_point}': {e}"))
        })?;
        Ok(Self::new(to, selector, calldata))
    }

    fn validate(&self) -> Result<(), SignerError> {
        if self.to == Felt::ZERO {
            return Err(SignerError::InvalidCall(
                "contract address must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Call as it appears in JSON call files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallRequest {
    pub contract_address: Option<String>,
    /// Entry point name; the selector is derived from it
    pub entry_point: Option<String>,
    /// Raw selector, as an alternative to `entry_point`
    pub selector: Option<String>,
    #[serde(default)]
    pub calldata: Vec<String>,
}

impl TryFrom<CallRequest> for Call {
    type Error = SignerError;

    fn try_from(request: CallRequest) -> Result<Self, Self::Error> {
        let to = request
            .contract_address
            .as_deref()
            .ok_or_else(|| SignerError::InvalidCall("missing contract_address".to_string()))
            .and_then(parse_felt)?;

        let calldata = request
            .calldata
            .iter()
            .map(|value| parse_felt(value))
            .collect::<Result<Vec<_>, _>>()?;

        match (request.entry_point.as_deref(), request.selector.as_deref()) {
            (Some(name), None) => Call::by_name(to, name, calldata),
            (None, Some(selector)) => Ok(Call::new(to, parse_felt(selector)?, calldata)),
            (Some(_), Some(_)) => Err(SignerError::InvalidCall(
                "specify either entry_point or selector, not both".to_string(),
            )),
            (None, None) => Err(SignerError::InvalidCall(
                "missing entry_point or selector".to_string(),
            )),
        }
    }
}

/// Parse a JSON array of call requests
pub fn calls_from_json(json: &str) -> Result<Vec<Call>, SignerError> {
    let requests: Vec<CallRequest> = serde_json::from_str(json)?;
    requests.into_iter().map(Call::try_from).collect()
}

/// Flatten calls into the account `__execute__` multicall layout:
///
/// `[n, (to, selector, data_offset, data_len) * n, total_len, data...]`
pub fn format_calldata(calls: &[Call]) -> Result<Vec<Felt>, SignerError> {
    if calls.is_empty() {
        return Err(SignerError::InvalidCall(
            "at least one call is required".to_string(),
        ));
    }

    let total_len: usize = calls.iter().map(|call| call.calldata.len()).sum();
    let mut encoded = Vec::with_capacity(2 + 4 * calls.len() + total_len);

    encoded.push(Felt::from(calls.len() as u64));

    let mut offset = 0usize;
    for call in calls {
        call.validate()?;
        encoded.push(call.to);
        encoded.push(call.selector);
        encoded.push(Felt::from(offset as u64));
        encoded.push(Felt::from(call.calldata.len() as u64));
        offset += call.calldata.len();
    }

    encoded.push(Felt::from(total_len as u64));
    for call in calls {
        encoded.extend_from_slice(&call.calldata);
    }

    debug!(
        "Formatted {} calls into {} calldata elements",
        calls.len(),
        encoded.len()
    );

    Ok(encoded)
}
