use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use jv_core::PaymentIntentRecord;
use jv_payments::{
    IntentService, MemoryAgreementSource, MemoryMirror, MockPaymentProvider, PaymentsConfig,
    INVALID_SECRET_KEY_MESSAGE,
};
use jv_server::{router, AppState, CREATE_PAYMENT_INTENT_PATH};

fn stub_intent() -> PaymentIntentRecord {
    PaymentIntentRecord {
        id: "pi_123".into(),
        client_secret: "secret_abc".into(),
        amount: 75_000,
        currency: "eur".into(),
        status: "requires_payment_method".into(),
    }
}

fn test_app(provider: &Arc<MockPaymentProvider>, mirror: &Arc<MemoryMirror>) -> Router {
    let service = IntentService::new(provider.clone(), mirror.clone());
    router(AppState::new(service, Arc::new(MemoryAgreementSource::default())))
}

fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(CREATE_PAYMENT_INTENT_PATH)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Yield until the detached mirror write has landed
async fn mirrored(mirror: &MemoryMirror) -> Vec<jv_payments::MirrorRow> {
    for _ in 0..100 {
        let rows = mirror.rows();
        if !rows.is_empty() {
            return rows;
        }
        tokio::task::yield_now().await;
    }
    mirror.rows()
}

#[tokio::test]
async fn preflight_returns_cors_headers_and_empty_body() {
    let provider = Arc::new(MockPaymentProvider::new());
    let mirror = Arc::new(MemoryMirror::new());

    let response = test_app(&provider, &mirror)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri(CREATE_PAYMENT_INTENT_PATH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type, Authorization");
    assert!(body_string(response).await.is_empty());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn creates_intent_against_stub_provider() {
    let provider = Arc::new(MockPaymentProvider::with_intent(stub_intent()));
    let mirror = Arc::new(MemoryMirror::new());

    let response = test_app(&provider, &mirror)
        .oneshot(post(r#"{"amount":75000,"user_id":"u1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        body_string(response).await,
        r#"{"clientSecret":"secret_abc","paymentIntentId":"pi_123"}"#
    );

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount, 75_000);
    assert_eq!(calls[0].currency, "eur");
    assert!(calls[0].automatic_payment_methods);
    assert_eq!(mirrored(&mirror).await[0].payment_intent_id, "pi_123");
}

#[tokio::test]
async fn invalid_amounts_are_rejected_without_provider_call() {
    let provider = Arc::new(MockPaymentProvider::new());
    let mirror = Arc::new(MemoryMirror::new());

    for body in [
        json!({"amount": 0, "user_id": "u1"}),
        json!({"amount": -100, "user_id": "u1"}),
        json!({"user_id": "u1"}),
        json!({"amount": 100}),
        json!({"amount": 100, "user_id": ""}),
    ] {
        let response = test_app(&provider, &mirror)
            .oneshot(post(&body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(
            body_json(response).await,
            json!({"error": "Invalid request: amount and user_id required"})
        );
    }

    assert_eq!(provider.call_count(), 0);
    assert!(mirror.rows().is_empty());
}

#[tokio::test]
async fn mirror_failure_still_returns_secret() {
    let provider = Arc::new(MockPaymentProvider::with_intent(stub_intent()));
    let mirror = Arc::new(MemoryMirror::failing("503 Service Unavailable"));

    let response = test_app(&provider, &mirror)
        .oneshot(post(r#"{"amount":75000,"user_id":"u1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["clientSecret"], "secret_abc");
}

#[tokio::test]
async fn provider_failure_is_server_error() {
    let provider = Arc::new(MockPaymentProvider::failing("Invalid API Key provided"));
    let mirror = Arc::new(MemoryMirror::new());

    let response = test_app(&provider, &mirror)
        .oneshot(post(r#"{"amount":75000,"user_id":"u1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Invalid API Key provided"})
    );
}

#[tokio::test]
async fn malformed_json_is_server_error() {
    let provider = Arc::new(MockPaymentProvider::new());
    let mirror = Arc::new(MemoryMirror::new());

    let response = test_app(&provider, &mirror)
        .oneshot(post("{amount:"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].as_str().is_some());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn publishable_key_is_rejected_before_any_call() {
    let config = PaymentsConfig {
        stripe_secret_key: Some("pk_test_123".into()),
        datastore_url: Some("http://127.0.0.1:9".into()),
        datastore_service_key: Some("service".into()),
    };
    let app = router(AppState::from_config(&config));

    let response = app
        .oneshot(post(r#"{"amount":75000,"user_id":"u1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": INVALID_SECRET_KEY_MESSAGE})
    );
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let provider = Arc::new(MockPaymentProvider::new());
    let mirror = Arc::new(MemoryMirror::new());

    let response = test_app(&provider, &mirror)
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(CREATE_PAYMENT_INTENT_PATH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await, json!({"error": "Method not allowed"}));
}
