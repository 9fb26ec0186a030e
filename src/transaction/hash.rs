use starknet_crypto::Felt;

use super::types::TransactionVersion;
use crate::constants::{selectors, transaction::PREFIX_INVOKE};
use crate::hash::{compute_hash_on_elements, HashChain};

/// Compute the hash of an invoke transaction.
///
/// V1: `H(invoke, 1, sender, 0, H(calldata), max_fee, chain_id, nonce)`
///
/// V0 uses the legacy field set: the account's `__execute__` selector takes
/// the place of the zero placeholder and there is no nonce.
pub fn compute_invoke_hash(
    version: TransactionVersion,
    calldata: &[Felt],
    nonce: Felt,
    max_fee: Felt,
    sender_address: Felt,
    chain_id: Felt,
) -> Felt {
    let mut hasher = HashChain::new();

    hasher.update(PREFIX_INVOKE);
    hasher.update(version.as_felt());
    hasher.update(sender_address);

    match version {
        TransactionVersion::V0 => {
            hasher.update(selectors::EXECUTE);
            hasher.update(compute_hash_on_elements(calldata));
            hasher.update(max_fee);
            hasher.update(chain_id);
        }
        TransactionVersion::V1 => {
            // Entry point selector slot, always zero since v1
            hasher.update(Felt::ZERO);
            hasher.update(compute_hash_on_elements(calldata));
            hasher.update(max_fee);
            hasher.update(chain_id);
            hasher.update(nonce);
        }
    }

    hasher.finalize()
}
