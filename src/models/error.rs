//! Validation and request-level error types.
//!
//! Every [`ValidationError`] variant renders to the same `401` response. The
//! variant itself only ever reaches internal logs, so a caller probing the
//! endpoint cannot learn which check failed.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Message returned to the client for every rejected request
pub const REJECTION_MESSAGE: &str = "Request signature could not be verified";

/// Reasons a signed request is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("timestamp or signature header is missing")]
    MissingHeader,

    #[error("timestamp is not a Unix epoch integer")]
    MalformedTimestamp,

    #[error("timestamp is outside the acceptance window")]
    StaleOrFutureTimestamp,

    #[error("signature is not valid base64")]
    MalformedSignature,

    #[error("signature does not match the request")]
    SignatureMismatch,
}

impl ValidationError {
    /// Stable label for structured logs
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingHeader => "missing_header",
            Self::MalformedTimestamp => "malformed_timestamp",
            Self::StaleOrFutureTimestamp => "stale_or_future_timestamp",
            Self::MalformedSignature => "malformed_signature",
            Self::SignatureMismatch => "signature_mismatch",
        }
    }
}

impl ResponseError for ValidationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Unauthorized",
            "message": REJECTION_MESSAGE
        }))
    }
}

/// Failure while validating a live request
///
/// Separates a rejected signature from a transport fault while reading the
/// body, so the host can answer them differently.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    #[error("failed to read request body: {0}")]
    Body(actix_web::Error),
}

impl ResponseError for RequestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Rejected(err) => err.status_code(),
            Self::Body(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Rejected(err) => err.error_response(),
            Self::Body(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Bad Request",
                "message": "Request body could not be read"
            })),
        }
    }
}
