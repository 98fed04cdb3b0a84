//! Bindings for the contracts of the exchange protocol that the test tooling
//! talks to.
pub mod alloy;
