//! Application factory.

use crate::{
    handlers::{health, receive_webhook, receive_webhook_direct},
    middleware::SignatureValidation,
    services::Validator,
};
use actix_web::{App, web};
use std::sync::Arc;

/// Creates the webhook receiver app
///
/// - `GET /api/health`: unsigned health probe
/// - `POST /webhooks`: behind [`SignatureValidation`]
/// - `POST /webhooks/direct`: the handler validates the request itself
///
/// Used by the binary and by the integration tests.
pub fn create_app(
    validator: Validator,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let shared = Arc::new(validator);

    App::new()
        .app_data(web::Data::from(Arc::clone(&shared)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(
            web::resource("/webhooks")
                .wrap(SignatureValidation::from_shared(shared))
                .route(web::post().to(receive_webhook)),
        )
        .service(web::resource("/webhooks/direct").route(web::post().to(receive_webhook_direct)))
}
