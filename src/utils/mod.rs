//! Utility functions and helper modules.
//!
//! The signing primitives live here: query canonicalization, the HMAC
//! signature itself and timestamp freshness, plus request metadata helpers
//! used for logging.

pub mod http;
pub mod query;
pub mod signature;
pub mod timestamp;

pub use http::*;
pub use query::*;
pub use signature::*;
pub use timestamp::*;
