//! Helpers for arranging exchange test preconditions: funded accounts,
//! signed orders and partially filled orders.

pub mod constants;
pub mod fill_scenarios;
pub mod in_memory;
pub mod order_factory;

pub use {
    fill_scenarios::{Fees, FillScenarios, OrderOptions, OrderParties},
    in_memory::InMemoryExchange,
};
