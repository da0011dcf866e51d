//! Signature validation middleware.

use crate::{
    models::{CandidateRequest, RequestError, SignatureHeaders, SignedRequest},
    services::Validator,
    utils::{extract_client_ip, extract_user_agent},
};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web::Bytes,
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
    sync::Arc,
};

/// Signature validation middleware factory
///
/// Wrap a resource or scope with it and the wrapped handlers only ever see
/// requests that passed validation; everything else is answered with `401`
/// before the handler runs. The body is buffered for the check and handed
/// on unchanged, so handlers read it as usual.
///
/// ```no_run
/// use actix_web::{App, HttpResponse, web};
/// use webhook_signature::{SignatureValidation, Validator};
///
/// let app = App::new().service(
///     web::resource("/webhooks")
///         .wrap(SignatureValidation::new(Validator::new("secret")))
///         .route(web::post().to(|body: web::Bytes| async move {
///             HttpResponse::Ok().body(body)
///         })),
/// );
/// ```
#[derive(Clone)]
pub struct SignatureValidation {
    validator: Arc<Validator>,
}

impl SignatureValidation {
    pub fn new(validator: Validator) -> Self {
        Self::from_shared(Arc::new(validator))
    }

    pub fn from_shared(validator: Arc<Validator>) -> Self {
        Self { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SignatureValidation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SignatureValidationService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SignatureValidationService {
            service: Rc::new(service),
            validator: Arc::clone(&self.validator),
        }))
    }
}

/// The actual signature validation middleware service
pub struct SignatureValidationService<S> {
    service: Rc<S>,
    validator: Arc<Validator>,
}

impl<S, B> Service<ServiceRequest> for SignatureValidationService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let validator = Arc::clone(&self.validator);

        Box::pin(async move {
            match validate_service_request(&validator, &mut req).await {
                Ok(()) => {
                    tracing::debug!(
                        target: "webhook",
                        path = %req.path(),
                        "Webhook signature accepted"
                    );
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log_rejection(&req, &err);
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}

/// Validate a request in place
///
/// Headers are checked before the body is read. On success the buffered body
/// is installed back as the request payload, so later extractors read the
/// same bytes from the start. On failure the request should not be passed on.
pub async fn validate_service_request(
    validator: &Validator,
    req: &mut ServiceRequest,
) -> Result<(), RequestError> {
    let headers = SignatureHeaders::extract(&*req)?;

    let body = req.extract::<Bytes>().await.map_err(RequestError::Body)?;

    validator.validate(&CandidateRequest::from_headers(
        &headers,
        req.raw_query(),
        &body,
    ))?;

    req.set_payload(Payload::from(body));
    Ok(())
}

fn log_rejection(req: &ServiceRequest, err: &RequestError) {
    let http_req = req.request();
    let reason = match err {
        RequestError::Rejected(reason) => reason.reason(),
        RequestError::Body(_) => "unreadable_body",
    };

    tracing::warn!(
        target: "webhook",
        reason = reason,
        method = %req.method(),
        path = %req.path(),
        ip_address = %extract_client_ip(http_req),
        user_agent = ?extract_user_agent(http_req),
        "Webhook request rejected"
    );
}
