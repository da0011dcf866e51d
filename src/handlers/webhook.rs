//! Webhook receiver handlers.

use crate::{models::WebhookReceipt, services::Validator, utils::extract_client_ip};
use actix_web::{HttpRequest, Result, web};
use sha2::{Digest, Sha256};

fn receipt(body: &[u8]) -> WebhookReceipt {
    WebhookReceipt {
        received_bytes: body.len(),
        sha256: hex::encode(Sha256::digest(body)),
    }
}

/// Receive a webhook that already passed [`crate::SignatureValidation`]
pub async fn receive_webhook(body: web::Bytes) -> Result<web::Json<WebhookReceipt>> {
    tracing::info!(target: "webhook", received_bytes = body.len(), "Webhook received");

    Ok(web::Json(receipt(&body)))
}

/// Receive a webhook, validating the signature inside the handler
///
/// For routes that cannot sit behind the middleware: the body is extracted
/// as bytes first and the same bytes are both checked and processed.
pub async fn receive_webhook_direct(
    req: HttpRequest,
    body: web::Bytes,
    validator: web::Data<Validator>,
) -> Result<web::Json<WebhookReceipt>> {
    if let Err(err) = validator.validate_request(&req, &body) {
        tracing::warn!(
            target: "webhook",
            reason = err.reason(),
            path = %req.path(),
            ip_address = %extract_client_ip(&req),
            "Webhook request rejected"
        );
        return Err(err.into());
    }

    tracing::info!(target: "webhook", received_bytes = body.len(), "Webhook received");

    Ok(web::Json(receipt(&body)))
}
