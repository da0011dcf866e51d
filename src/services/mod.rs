//! Service layer modules.
//!
//! [`validator::Validator`] composes the freshness check and the signature
//! check into a single verdict for a request.

pub mod validator;

pub use validator::*;
