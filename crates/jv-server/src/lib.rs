//! jv-investor HTTP Server
//!
//! Axum router for the payment-intent endpoint and the dashboard API.

pub mod handlers;
pub mod state;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::handlers::{
    create_payment_intent, health_check, list_agreements, method_not_allowed, preflight,
};
pub use crate::state::{AppState, Configured};

/// Path of the payment-intent function
pub const CREATE_PAYMENT_INTENT_PATH: &str = "/create-payment-intent";

/// Build the API router. Every response carries permissive CORS headers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/agreements", get(list_agreements))
        .route(
            CREATE_PAYMENT_INTENT_PATH,
            post(create_payment_intent)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
