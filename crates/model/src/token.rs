use {alloy::primitives::Address, serde::{Deserialize, Serialize}};

/// Symbol of the protocol fee token.
pub const ZRX: &str = "ZRX";
/// Symbol of the wrapped native token.
pub const WETH: &str = "WETH";

/// Reference data of a token known to the exchange.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(default)]
    pub name: String,
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

impl Token {
    /// Whether this is one of the tokens whose supply is not administered by
    /// a dummy token contract (the fee token and the wrapped native token).
    pub fn is_reserved(&self) -> bool {
        self.symbol == ZRX || self.symbol == WETH
    }
}
