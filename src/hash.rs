use starknet_crypto::{pedersen_hash, Felt};

/// Pedersen hash chain over a sequence of felts.
///
/// `finalize` folds in the number of elements absorbed, so the result is
/// sensitive to both order and length.
#[derive(Debug, Clone)]
pub struct HashChain {
    state: Felt,
    count: u64,
}

impl Default for HashChain {
    fn default() -> Self {
        Self::new()
    }
}

impl HashChain {
    pub fn new() -> Self {
        Self {
            state: Felt::ZERO,
            count: 0,
        }
    }

    pub fn update(&mut self, value: Felt) {
        self.state = pedersen_hash(&self.state, &value);
        self.count += 1;
    }

    pub fn finalize(self) -> Felt {
        pedersen_hash(&self.state, &Felt::from(self.count))
    }
}

/// h(h(h(h(0, a0), a1), ...), n)
pub fn compute_hash_on_elements(elements: &[Felt]) -> Felt {
    let mut chain = HashChain::new();
    for element in elements {
        chain.update(*element);
    }
    chain.finalize()
}
