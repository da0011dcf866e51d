//! HTTP request handlers for the webhook receiver.

pub mod app;
pub mod health;
pub mod webhook;

pub use app::*;
pub use health::*;
pub use webhook::*;
