use {
    alloy::primitives::{U256, utils::Unit},
    anyhow::{Context, Result},
};

pub trait EthUnit: std::marker::Sized {
    /// Returns the current wei amount.
    fn wei(self) -> U256;

    /// Returns the current Eth amount as wei (i.e. 1e18 wei).
    fn eth(self) -> U256 {
        self.wei() * Unit::ETHER.wei()
    }
}

impl EthUnit for u64 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

/// Converts a whole number of token units into base units for a token with
/// the given number of decimals, i.e. `units * 10^decimals`.
pub fn to_base_units(units: U256, decimals: u8) -> Result<U256> {
    U256::from(10)
        .checked_pow(U256::from(decimals))
        .and_then(|scale| units.checked_mul(scale))
        .with_context(|| format!("{units} units with {decimals} decimals overflow u256"))
}
