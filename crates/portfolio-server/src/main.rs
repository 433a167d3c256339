//! invest-track HTTP Server
//!
//! Axum-based server exposing the portfolio tracker: investment CRUD,
//! aggregate metrics, historical snapshots, AI analysis/alerts, and a
//! WebSocket metrics stream driven by store change notifications.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assistant_core::LlmProvider;
use assistant_runtime::OllamaProvider;
use portfolio_advisor::MemoryInvestmentStore;

use crate::handlers::{
    analyze_portfolio_handler, create_investment, delete_investment, generate_alerts_handler,
    get_investment, health_check, list_investments, list_models, list_snapshots,
    metrics_stream_handler, portfolio_metrics, record_snapshot, update_investment,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize LLM provider
    let provider = Arc::new(OllamaProvider::from_env());

    // Verify provider connection
    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to Ollama");
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - analysis and alerts will fail");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    let model = std::env::var("ADVISOR_MODEL").unwrap_or_else(|_| "llama3.2".into());
    tracing::info!("Advisor model: {}", model);

    // Initialize storage
    let store = Arc::new(MemoryInvestmentStore::new());

    // Build application state
    let state = AppState {
        provider,
        store,
        model,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))

        // Investments CRUD
        .route("/api/investments", get(list_investments).post(create_investment))
        .route(
            "/api/investments/{id}",
            get(get_investment).put(update_investment).delete(delete_investment),
        )

        // Portfolio views
        .route("/api/portfolio/metrics", get(portfolio_metrics))
        .route("/api/portfolio/snapshots", get(list_snapshots).post(record_snapshot))
        .route("/api/portfolio/stream", get(metrics_stream_handler))

        // AI flows
        .route("/api/portfolio/analyze", post(analyze_portfolio_handler))
        .route("/api/alerts/generate", post(generate_alerts_handler))

        // Static files (dashboard frontend)
        .nest_service("/", tower_http::services::ServeDir::new("static"))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 invest-track server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                   - Health check");
    tracing::info!("  GET  /api/models               - List available models");
    tracing::info!("  GET  /api/investments          - List investments");
    tracing::info!("  POST /api/investments          - Create investment");
    tracing::info!("  GET  /api/portfolio/metrics    - Aggregate metrics");
    tracing::info!("  GET  /api/portfolio/snapshots  - Valuation history");
    tracing::info!("  GET  /api/portfolio/stream     - WebSocket metrics stream");
    tracing::info!("  POST /api/portfolio/analyze    - AI portfolio analysis");
    tracing::info!("  POST /api/alerts/generate      - AI smart alerts");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
