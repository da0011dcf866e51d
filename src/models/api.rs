//! API response models for the receiver endpoints.

use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Acknowledgement returned for an accepted webhook
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookReceipt {
    /// Number of body bytes the handler read
    pub received_bytes: usize,
    /// Hex SHA-256 of the body the handler read
    pub sha256: String,
}
