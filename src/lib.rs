//! Webhook Signature - HMAC-SHA256 validation for inbound webhook requests
//!
//! A sender signs each request with a shared secret:
//!
//! ```text
//! MessageBird-Request-Timestamp: <unix seconds>
//! MessageBird-Signature: base64(HMAC_SHA256(key, TIMESTAMP \n CANONICAL_QUERY \n SHA256(BODY)))
//! ```
//!
//! The receiver rejects a request unless its timestamp lies inside the
//! acceptance window and the signature matches. Every rejection looks the
//! same to the caller.
//!
//! ## Architecture
//!
//! - `utils/` - query canonicalization, HMAC signing and freshness checks
//! - `services/` - the [`Validator`] composing both checks
//! - `middleware/` - [`SignatureValidation`], the actix gatekeeper
//! - `models/` - request inputs, error taxonomy, response bodies
//! - `config/` - environment driven configuration
//! - `handlers/` - the receiver endpoints and app factory
//! - `telemetry` - tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use webhook_signature::{Validator, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     HttpServer::new(|| create_app(Validator::new("shared-secret")))
//!         .bind(("127.0.0.1", 8080))?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{
    ConfigError, DEFAULT_VALIDITY_WINDOW, ServerConfig, SignatureConfig, SigningKey,
};
pub use handlers::{create_app, health, receive_webhook, receive_webhook_direct};
pub use middleware::{SignatureValidation, SignatureValidationService, validate_service_request};
pub use models::{
    CandidateRequest, HealthResponse, REJECTION_MESSAGE, RequestError, SIGNATURE_HEADER,
    SignatureHeaders, SignedRequest, TIMESTAMP_HEADER, ValidationError, WebhookReceipt,
};
pub use services::Validator;
pub use telemetry::{LogFormat, TelemetryConfig, init_tracing};
