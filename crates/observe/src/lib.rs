//! Logging initialisation shared by the test tooling crates and the
//! integration test harness.
pub mod config;
pub mod tracing;

pub use config::Config;
