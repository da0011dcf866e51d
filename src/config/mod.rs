//! Configuration structures and loading utilities.
//!
//! Every configuration type can be loaded from environment variables with
//! `from_env()`, or from any variable source with `from_lookup()`.

pub mod server;
pub mod signature;

pub use server::*;
pub use signature::*;

use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    MissingVariable(&'static str),

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}
