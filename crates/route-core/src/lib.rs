//! route-core: Shared types, errors, configuration, and oracle capabilities
//!
//! This crate provides the foundational types used across the router workspace.

pub mod config;
pub mod errors;
pub mod oracle;
pub mod types;

pub use config::*;
pub use errors::*;
pub use oracle::*;
pub use types::*;
