//! Contains the data types that are passed between the exchange client, the
//! order factory and the fill scenarios.

pub mod order;
pub mod signature;
pub mod token;

use alloy::primitives::Address;

/// The address used for "no address", e.g. an order open to any taker or
/// an order without fee recipient.
pub const NULL_ADDRESS: Address = Address::ZERO;
