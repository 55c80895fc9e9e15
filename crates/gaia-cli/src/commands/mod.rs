//! CLI command implementations for the Gaia tool gateway.

pub mod availability;
pub mod serve;
pub mod tools;
