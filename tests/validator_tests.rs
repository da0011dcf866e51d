use actix_web::{http::StatusCode, test};
use std::{sync::Arc, time::Duration};
use webhook_signature::{
    CandidateRequest, SIGNATURE_HEADER, TIMESTAMP_HEADER, ValidationError, Validator,
    validate_service_request,
};

#[tokio::test]
async fn test_shared_validator_under_concurrent_use() {
    let validator = Arc::new(Validator::new("secret").with_validity_window(None));

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let validator = Arc::clone(&validator);
            tokio::spawn(async move {
                let timestamp = (1_000_000_000 + i).to_string();
                let body = format!("event-{i}").into_bytes();
                let query = format!("n={i}&kind=test");
                let signature = validator.sign(&timestamp, &query, &body).unwrap();

                let good = CandidateRequest::new(&timestamp, &query, &body, &signature);
                let tampered = CandidateRequest::new(&timestamp, "n=999&kind=test", &body, &signature);

                (validator.validate(&good), validator.validate(&tampered))
            })
        })
        .collect();

    for handle in handles {
        let (good, tampered) = handle.await.unwrap();
        assert_eq!(good, Ok(()));
        assert_eq!(tampered, Err(ValidationError::SignatureMismatch));
    }
}

#[tokio::test]
async fn test_window_override_is_per_instance() {
    let strict = Validator::new("secret");
    let relaxed = strict.clone().with_validity_window(Some(Duration::from_secs(7200)));

    let timestamp = (chrono::Utc::now().timestamp() - 600).to_string();
    let signature = strict.sign(&timestamp, "", b"").unwrap();
    let candidate = CandidateRequest::new(&timestamp, "", b"", &signature);

    assert_eq!(
        strict.validate(&candidate),
        Err(ValidationError::StaleOrFutureTimestamp)
    );
    assert_eq!(relaxed.validate(&candidate), Ok(()));
    assert_eq!(strict.validity_window(), Some(Duration::from_secs(5)));
}

#[actix_web::test]
async fn test_direct_service_request_validation_restores_body() {
    let validator = Validator::new("secret");
    let timestamp = chrono::Utc::now().timestamp().to_string();
    let body = b"exact original bytes \x00\xff";
    let signature = validator.sign(&timestamp, "z=1&a=2", body).unwrap();

    let mut req = test::TestRequest::post()
        .uri("/webhooks?z=1&a=2")
        .insert_header((TIMESTAMP_HEADER, timestamp))
        .insert_header((SIGNATURE_HEADER, signature))
        .set_payload(body.to_vec())
        .to_srv_request();

    validate_service_request(&validator, &mut req).await.unwrap();

    let replayed = req.extract::<actix_web::web::Bytes>().await.unwrap();
    assert_eq!(replayed.as_ref(), body.as_slice());
}

#[actix_web::test]
async fn test_direct_service_request_rejection_is_unauthorized() {
    let validator = Validator::new("secret");

    let mut req = test::TestRequest::post()
        .uri("/webhooks")
        .insert_header((TIMESTAMP_HEADER, chrono::Utc::now().timestamp().to_string()))
        .insert_header((SIGNATURE_HEADER, "AAAA"))
        .set_payload("body")
        .to_srv_request();

    let err = validate_service_request(&validator, &mut req)
        .await
        .unwrap_err();

    let resp = req.error_response(err);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
