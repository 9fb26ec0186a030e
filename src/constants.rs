use starknet::macros::felt;
use starknet_crypto::Felt;

/// Chain ID constants
pub mod chain_ids {
    use super::*;

    pub const MAINNET: Felt = felt!("0x534e5f4d41494e"); // SN_MAIN
    pub const GOERLI: Felt = felt!("0x534e5f474f45524c49"); // SN_GOERLI
    pub const GOERLI2: Felt = felt!("0x534e5f474f45524c4932"); // SN_GOERLI2
    pub const SEPOLIA: Felt = felt!("0x534e5f5345504f4c4941"); // SN_SEPOLIA

    /// Network names a provider may report, and their chain ids
    pub const KNOWN_NETWORKS: &[(&str, Felt)] = &[
        ("SN_MAIN", MAINNET),
        ("SN_GOERLI", GOERLI),
        ("SN_GOERLI2", GOERLI2),
        ("SN_SEPOLIA", SEPOLIA),
    ];
}

/// Transaction hash constants
pub mod transaction {
    use super::*;

    /// Cairo short string "invoke"
    pub const PREFIX_INVOKE: Felt = felt!("0x696e766f6b65");

    /// Wire tag for invoke transactions
    pub const INVOKE_TYPE: &str = "INVOKE";
}

/// Function selector constants
pub mod selectors {
    use super::*;

    /// get_selector_from_name("__execute__"), the account entry point
    pub const EXECUTE: Felt =
        felt!("0x15d40a3d6ca2ac30f4031e42be28da9b056fef9bb7357ac5e85627ee876e5ad");
}

/// Stark curve constants
pub mod curve {
    use super::*;

    /// Order of the Stark curve generator
    pub const EC_ORDER: Felt =
        felt!("0x800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f");

    /// Message hashes must stay below 2^251
    pub const MESSAGE_HASH_BITS: u32 = 251;
}
