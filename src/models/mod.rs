//! Data models for signed webhook requests.
//!
//! This module contains the request inputs to validation, the error
//! taxonomy, and the response bodies of the receiver endpoints.

pub mod api;
pub mod error;
pub mod request;

pub use api::*;
pub use error::*;
pub use request::*;
