//! jv-investor server binary

use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jv_payments::PaymentsConfig;
use jv_server::{router, AppState, CREATE_PAYMENT_INTENT_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PaymentsConfig::from_env();
    let state = AppState::from_config(&config);

    match state.intents.get() {
        Ok(service) => tracing::info!(provider = service.provider_name(), "✓ Payments configured"),
        Err(msg) => {
            tracing::warn!("⚠ {msg}");
            tracing::warn!("  Set STRIPE_SECRET_KEY, SUPABASE_URL and SERVICE_ROLE_KEY in .env");
        }
    }

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());
    let app = router(state).fallback_service(ServeDir::new(&static_dir));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("jv-investor server running on http://{}", addr);
    tracing::info!("  POST {CREATE_PAYMENT_INTENT_PATH} - Create payment intent");
    tracing::info!("  GET  /api/agreements        - List JV agreements");
    tracing::info!("  GET  /health                - Health check");
    tracing::info!("  *    {static_dir}/          - Dashboard (WASM)");

    axum::serve(listener, app).await?;

    Ok(())
}
