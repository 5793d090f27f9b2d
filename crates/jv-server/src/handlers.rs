//! HTTP Handlers

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;

use jv_core::{ErrorBody, JvAgreement, PaymentIntentCreated};
use jv_payments::PaymentError;

use crate::state::AppState;

/// Error half of every handler
pub type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody::new(message)))
}

fn payment_error(e: &PaymentError) -> ApiError {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    api_error(status, e.response_message())
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub payments_configured: bool,
    pub agreements_configured: bool,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        payments_configured: state.intents.is_ready(),
        agreements_configured: state.agreements.is_ready(),
    })
}

/// CORS pre-flight. Headers come from the router layers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    api_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Create a payment intent and return its client secret.
///
/// The body is taken raw so malformed JSON surfaces as a 500 with the parser
/// message rather than an extractor rejection.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PaymentIntentCreated>, ApiError> {
    let service = state.intents.get().map_err(|msg| {
        tracing::error!(error = %msg, "Payment intent requested while misconfigured");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, msg)
    })?;

    let created = service.create_from_json(&body).await.map_err(|e| {
        if e.status_code() == 400 {
            tracing::warn!(error = %e, "Rejected payment intent request");
        } else {
            tracing::error!(error = %e, "Error creating payment intent");
        }
        payment_error(&e)
    })?;

    Ok(Json(created))
}

/// List joint-venture agreements for the dashboard
pub async fn list_agreements(
    State(state): State<AppState>,
) -> Result<Json<Vec<JvAgreement>>, ApiError> {
    let source = state
        .agreements
        .get()
        .map_err(|msg| api_error(StatusCode::INTERNAL_SERVER_ERROR, msg))?;

    let agreements = source.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load agreements");
        payment_error(&e)
    })?;

    Ok(Json(agreements))
}
