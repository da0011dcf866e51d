//! Health check endpoint handler.

use crate::models::HealthResponse;
use actix_web::{Result, web};

/// Health check endpoint
///
/// Unsigned, for load balancers and probes.
pub async fn health() -> Result<web::Json<HealthResponse>> {
    Ok(web::Json(HealthResponse {
        status: "healthy".to_string(),
    }))
}
