//! Signed webhook request validation.

use crate::{
    config::{DEFAULT_VALIDITY_WINDOW, SignatureConfig, SigningKey},
    models::{CandidateRequest, SignatureHeaders, SignedRequest, ValidationError},
    utils::{canonical_query, check_freshness, compute_signature, encode_signature, verify_signature},
};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Validates the signature and timestamp of inbound webhook requests
///
/// Holds only immutable configuration, so one instance can be shared by every
/// worker without locking.
///
/// ```
/// use webhook_signature::{CandidateRequest, Validator};
///
/// let validator = Validator::new("secret").with_validity_window(None);
/// let signature = validator.sign("1000000000", "b=2&a=1", b"{}").unwrap();
///
/// let candidate = CandidateRequest::new("1000000000", "a=1&b=2", b"{}", &signature);
/// assert!(validator.validate(&candidate).is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct Validator {
    signing_key: SigningKey,
    validity_window: Option<Duration>,
}

impl Validator {
    /// Create a validator using [`DEFAULT_VALIDITY_WINDOW`]
    pub fn new(signing_key: impl Into<SigningKey>) -> Self {
        Self {
            signing_key: signing_key.into(),
            validity_window: Some(DEFAULT_VALIDITY_WINDOW),
        }
    }

    pub fn from_config(config: &SignatureConfig) -> Self {
        Self {
            signing_key: config.signing_key.clone(),
            validity_window: config.validity_window,
        }
    }

    /// Override the acceptance window; `None` disables the freshness check
    pub fn with_validity_window(mut self, window: Option<Duration>) -> Self {
        self.validity_window = window;
        self
    }

    pub fn validity_window(&self) -> Option<Duration> {
        self.validity_window
    }

    /// Base64 signature a sender attaches for this timestamp, query and body
    pub fn sign(
        &self,
        timestamp: &str,
        raw_query: &str,
        body: &[u8],
    ) -> Result<String, ValidationError> {
        let digest = compute_signature(
            self.signing_key.as_bytes(),
            timestamp,
            &canonical_query(raw_query),
            body,
        )?;
        Ok(encode_signature(&digest))
    }

    /// Validate a candidate against the current time
    pub fn validate(&self, candidate: &CandidateRequest<'_>) -> Result<(), ValidationError> {
        self.validate_at(candidate, Utc::now())
    }

    /// Validate a candidate against a given time
    ///
    /// The freshness check runs first and short-circuits the HMAC work.
    pub fn validate_at(
        &self,
        candidate: &CandidateRequest<'_>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        check_freshness(candidate.timestamp, self.validity_window, now)?;

        verify_signature(
            self.signing_key.as_bytes(),
            candidate.timestamp,
            &canonical_query(candidate.query),
            candidate.body,
            candidate.signature,
        )
    }

    /// Validate a request whose body has already been buffered
    ///
    /// Use this from a handler that takes the body as `web::Bytes`; the
    /// extractor leaves the bytes untouched for the rest of the handler.
    pub fn validate_request<R: SignedRequest + ?Sized>(
        &self,
        req: &R,
        body: &[u8],
    ) -> Result<(), ValidationError> {
        let headers = SignatureHeaders::extract(req)?;
        self.validate(&CandidateRequest::from_headers(&headers, req.raw_query(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
    use actix_web::test::TestRequest;

    const TS: &str = "1000000000";

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_000_000_000, 0).unwrap()
    }

    #[test]
    fn test_new_uses_default_window() {
        let validator = Validator::new("secret");
        assert_eq!(validator.validity_window(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_config_copies_window() {
        let mut config = SignatureConfig::new("secret");
        config.validity_window = None;

        assert_eq!(Validator::from_config(&config).validity_window(), None);
    }

    #[test]
    fn test_sign_then_validate_at_signing_time() {
        let validator = Validator::new("secret");
        let body = br#"{"id":"abc"}"#;
        let signature = validator.sign(TS, "x=1", body).unwrap();

        let candidate = CandidateRequest::new(TS, "x=1", body, &signature);
        assert_eq!(validator.validate_at(&candidate, fixed_now()), Ok(()));
    }

    #[test]
    fn test_query_order_does_not_change_signature() {
        let validator = Validator::new("secret");

        assert_eq!(
            validator.sign(TS, "b=2&a=1", b"").unwrap(),
            validator.sign(TS, "a=1&b=2", b"").unwrap()
        );
    }

    #[test]
    fn test_tampered_non_utf8_query_is_rejected() {
        let validator = Validator::new("secret");
        let signature = validator.sign(TS, "amount=%ff", b"").unwrap();

        let original = CandidateRequest::new(TS, "amount=%ff", b"", &signature);
        let tampered = CandidateRequest::new(TS, "amount=%fe", b"", &signature);

        assert_eq!(validator.validate_at(&original, fixed_now()), Ok(()));
        assert_eq!(
            validator.validate_at(&tampered, fixed_now()),
            Err(ValidationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_freshness_runs_before_signature() {
        let validator = Validator::new("secret");
        let candidate = CandidateRequest::new("999999000", "", b"", "not base64!");

        assert_eq!(
            validator.validate_at(&candidate, fixed_now()),
            Err(ValidationError::StaleOrFutureTimestamp)
        );
    }

    #[test]
    fn test_wrong_key_is_a_mismatch() {
        let signature = Validator::new("other").sign(TS, "", b"").unwrap();
        let candidate = CandidateRequest::new(TS, "", b"", &signature);

        assert_eq!(
            Validator::new("secret").validate_at(&candidate, fixed_now()),
            Err(ValidationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_disabled_window_accepts_old_signed_request() {
        let validator = Validator::new("secret").with_validity_window(None);
        let signature = validator.sign("1", "", b"").unwrap();
        let candidate = CandidateRequest::new("1", "", b"", &signature);

        assert_eq!(validator.validate(&candidate), Ok(()));
    }

    #[test]
    fn test_validate_request_reads_headers_and_query() {
        let validator = Validator::new("secret");
        let now = Utc::now().timestamp().to_string();
        let body = b"hello";
        let signature = validator.sign(&now, "b=2&a=1", body).unwrap();

        let req = TestRequest::post()
            .uri("/webhooks?b=2&a=1")
            .insert_header((TIMESTAMP_HEADER, now.as_str()))
            .insert_header((SIGNATURE_HEADER, signature.as_str()))
            .to_http_request();

        assert_eq!(validator.validate_request(&req, body), Ok(()));
        assert_eq!(
            validator.validate_request(&req, b"hellO"),
            Err(ValidationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_validate_request_without_headers() {
        let req = TestRequest::post().uri("/webhooks").to_http_request();

        assert_eq!(
            Validator::new("secret").validate_request(&req, b""),
            Err(ValidationError::MissingHeader)
        );
    }

    #[test]
    fn test_validator_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
    }
}
