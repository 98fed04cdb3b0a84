pub use model::NULL_ADDRESS;

/// Whole token units the coinbase account is seeded with for every dummy
/// token.
pub const INITIAL_COINBASE_TOKEN_SUPPLY_IN_UNITS: u64 = 100;

/// Expiration used for orders that do not specify one; close to infinite
/// (2050-01-01).
pub const DEFAULT_EXPIRATION_UNIX_TIMESTAMP_SEC: u64 = 2_524_604_400;
