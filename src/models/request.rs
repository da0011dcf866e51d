//! Request-side inputs to signature validation.

use crate::models::ValidationError;
use actix_web::{HttpRequest, dev::ServiceRequest};

/// Header carrying the request creation time as Unix epoch seconds
pub const TIMESTAMP_HEADER: &str = "MessageBird-Request-Timestamp";

/// Header carrying the base64 encoded HMAC-SHA256 signature
pub const SIGNATURE_HEADER: &str = "MessageBird-Signature";

/// The slice of an HTTP request that signature validation reads
///
/// Implemented for actix's request types; any other framework only needs
/// header lookup and the raw query string to plug in.
pub trait SignedRequest {
    /// Value of the named header, `None` when absent or not valid UTF-8
    fn header(&self, name: &str) -> Option<&str>;

    /// Query string exactly as received, without the leading `?`
    fn raw_query(&self) -> &str;
}

impl SignedRequest for HttpRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|h| h.to_str().ok())
    }

    fn raw_query(&self) -> &str {
        self.query_string()
    }
}

impl SignedRequest for ServiceRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|h| h.to_str().ok())
    }

    fn raw_query(&self) -> &str {
        self.query_string()
    }
}

/// Timestamp and signature headers of a request
///
/// Extracted before the body is read so a request without them is turned
/// away without buffering anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub timestamp: String,
    pub signature: String,
}

impl SignatureHeaders {
    /// Read both headers; empty values count as missing
    pub fn extract<R: SignedRequest + ?Sized>(req: &R) -> Result<Self, ValidationError> {
        let timestamp = non_empty_header(req, TIMESTAMP_HEADER)?;
        let signature = non_empty_header(req, SIGNATURE_HEADER)?;

        Ok(Self {
            timestamp: timestamp.to_string(),
            signature: signature.to_string(),
        })
    }
}

fn non_empty_header<'r, R: SignedRequest + ?Sized>(
    req: &'r R,
    name: &str,
) -> Result<&'r str, ValidationError> {
    req.header(name)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingHeader)
}

/// Everything a signature is checked against, borrowed from one request
#[derive(Debug, Clone, Copy)]
pub struct CandidateRequest<'a> {
    pub timestamp: &'a str,
    /// Raw, not yet canonicalized query string
    pub query: &'a str,
    pub body: &'a [u8],
    /// Base64 signature as supplied by the sender
    pub signature: &'a str,
}

impl<'a> CandidateRequest<'a> {
    pub fn new(timestamp: &'a str, query: &'a str, body: &'a [u8], signature: &'a str) -> Self {
        Self {
            timestamp,
            query,
            body,
            signature,
        }
    }

    /// Assemble a candidate from already extracted headers
    pub fn from_headers(headers: &'a SignatureHeaders, query: &'a str, body: &'a [u8]) -> Self {
        Self::new(&headers.timestamp, query, body, &headers.signature)
    }
}
