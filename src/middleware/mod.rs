//! Custom middleware implementations.
//!
//! This module contains the gatekeeping middleware that rejects unsigned or
//! badly signed webhook requests before any handler runs.

pub mod signature;

pub use signature::*;
