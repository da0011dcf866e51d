//! HMAC-SHA256 request signatures.
//!
//! ```text
//! signature = base64(HMAC_SHA256(key, TIMESTAMP + "\n" + CANONICAL_QUERY + "\n" + SHA256(BODY)))
//! ```
//!
//! `SHA256(BODY)` enters the message as the raw 32-byte digest.

use crate::models::ValidationError;
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Build the byte sequence covered by the signature
pub fn signed_message(timestamp: &str, canonical_query: &str, body: &[u8]) -> Vec<u8> {
    let body_hash = Sha256::digest(body);

    let mut message =
        Vec::with_capacity(timestamp.len() + canonical_query.len() + body_hash.len() + 2);
    message.extend_from_slice(timestamp.as_bytes());
    message.push(b'\n');
    message.extend_from_slice(canonical_query.as_bytes());
    message.push(b'\n');
    message.extend_from_slice(&body_hash);
    message
}

fn keyed_mac(
    key: &[u8],
    timestamp: &str,
    canonical_query: &str,
    body: &[u8],
) -> Result<HmacSha256, ValidationError> {
    // HMAC takes keys of any length; this arm is unreachable in practice.
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|_| ValidationError::SignatureMismatch)?;
    mac.update(&signed_message(timestamp, canonical_query, body));
    Ok(mac)
}

/// Compute the raw HMAC-SHA256 digest for a request
pub fn compute_signature(
    key: &[u8],
    timestamp: &str,
    canonical_query: &str,
    body: &[u8],
) -> Result<Vec<u8>, ValidationError> {
    let mac = keyed_mac(key, timestamp, canonical_query, body)?;
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Encode a digest the way it travels in the signature header
pub fn encode_signature(digest: &[u8]) -> String {
    STANDARD.encode(digest)
}

/// Verify a base64 signature against the request it claims to sign
///
/// The digest comparison runs in constant time.
pub fn verify_signature(
    key: &[u8],
    timestamp: &str,
    canonical_query: &str,
    body: &[u8],
    supplied: &str,
) -> Result<(), ValidationError> {
    let supplied = STANDARD
        .decode(supplied)
        .map_err(|_| ValidationError::MalformedSignature)?;

    keyed_mac(key, timestamp, canonical_query, body)?
        .verify_slice(&supplied)
        .map_err(|_| ValidationError::SignatureMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"secret";
    const TS: &str = "1000000000";

    #[test]
    fn test_signed_message_layout() {
        let message = signed_message(TS, "a=1", b"");
        let empty_hash = Sha256::digest(b"");

        assert!(message.starts_with(b"1000000000\na=1\n"));
        assert_eq!(&message[15..], empty_hash.as_slice());
        assert_eq!(message.len(), 15 + 32);
    }

    #[test]
    fn test_fixture_matches_independent_computation() {
        let mut expected_message = b"1000000000\n\n".to_vec();
        expected_message.extend_from_slice(&Sha256::digest(b""));
        let mut mac = HmacSha256::new_from_slice(b"secret").unwrap();
        mac.update(&expected_message);
        let expected = encode_signature(&mac.finalize().into_bytes());

        let digest = compute_signature(KEY, TS, "", b"").unwrap();
        assert_eq!(digest.len(), 32);
        assert_eq!(encode_signature(&digest), expected);
        assert_eq!(verify_signature(KEY, TS, "", b"", &expected), Ok(()));
    }

    #[test]
    fn test_round_trip() {
        let body = br#"{"event":"message.created"}"#;
        let signature = encode_signature(&compute_signature(KEY, TS, "a=1&b=2", body).unwrap());

        assert_eq!(verify_signature(KEY, TS, "a=1&b=2", body, &signature), Ok(()));
    }

    #[test]
    fn test_single_byte_changes_break_verification() {
        let body = b"payload".to_vec();
        let signature = encode_signature(&compute_signature(KEY, TS, "a=1", &body).unwrap());

        let mismatch = Err(ValidationError::SignatureMismatch);
        assert_eq!(verify_signature(b"secreT", TS, "a=1", &body, &signature), mismatch);
        assert_eq!(verify_signature(KEY, "1000000001", "a=1", &body, &signature), mismatch);
        assert_eq!(verify_signature(KEY, TS, "a=2", &body, &signature), mismatch);

        for i in 0..body.len() {
            let mut flipped = body.clone();
            flipped[i] ^= 0x01;
            assert_eq!(verify_signature(KEY, TS, "a=1", &flipped, &signature), mismatch);
        }
    }

    #[test]
    fn test_malformed_base64_is_reported_separately() {
        assert_eq!(
            verify_signature(KEY, TS, "", b"", "not base64!"),
            Err(ValidationError::MalformedSignature)
        );
    }

    #[test]
    fn test_truncated_signature_is_a_mismatch() {
        let digest = compute_signature(KEY, TS, "", b"").unwrap();
        let truncated = encode_signature(&digest[..31]);

        assert_eq!(
            verify_signature(KEY, TS, "", b"", &truncated),
            Err(ValidationError::SignatureMismatch)
        );
    }
}
