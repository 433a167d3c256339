//! HTTP/WebSocket Handlers

use axum::{
    extract::{
        ws::{Message, WebSocket},
        FromRequestParts, Path, State, WebSocketUpgrade,
    },
    http::{request::Parts, StatusCode},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};

use assistant_core::provider::{GenerationOptions, LlmProvider, ModelInfo};
use portfolio_advisor::{
    aggregate, flows, AdvisorError, AggregateMetrics, InvestmentAsset, InvestmentStore,
    NewInvestment, PortfolioSnapshot, SmartAlert,
};
use uuid::Uuid;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider_connected: bool,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub financial_goals: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAlertsRequest {
    pub portfolio_analysis: String,
    pub risk_profile: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateAlertsResponse {
    pub alerts: Vec<SmartAlert>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Identity
// ============================================================================

/// Authenticated user id, supplied by the identity collaborator.
///
/// Stand-in transport: the `x-user-id` header. Requests without it get
/// 401 and nothing portfolio-specific is served.
pub struct UserId(pub String);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| UserId(v.to_string()))
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Not signed in".into(),
                        code: "UNAUTHENTICATED".into(),
                    }),
                )
            })
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

fn map_advisor_error(err: AdvisorError) -> ApiError {
    let (status, code) = match &err {
        AdvisorError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        AdvisorError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INVESTMENT"),
        AdvisorError::Assistant(_) | AdvisorError::MalformedResponse(_) => {
            tracing::error!("advisor flow failed: {}", err);
            (StatusCode::BAD_GATEWAY, "ANALYSIS_ERROR")
        }
        _ => {
            tracing::error!("store operation failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider_connected,
        model: state.model.clone(),
    })
}

/// List models available on the provider
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelInfo>>, ApiError> {
    let models = state.provider.list_models().await.map_err(|e| {
        tracing::warn!("model listing failed: {}", e);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: e.user_message(),
                code: "PROVIDER_UNAVAILABLE".into(),
            }),
        )
    })?;

    Ok(Json(models))
}

/// All investments for the current user
pub async fn list_investments(
    State(state): State<AppState>,
    UserId(user): UserId,
) -> Result<Json<Vec<InvestmentAsset>>, ApiError> {
    let assets = state.store.list(&user).await.map_err(map_advisor_error)?;
    Ok(Json(assets))
}

/// Create an investment from the submitted form
pub async fn create_investment(
    State(state): State<AppState>,
    UserId(user): UserId,
    Json(input): Json<NewInvestment>,
) -> Result<(StatusCode, Json<InvestmentAsset>), ApiError> {
    let asset = state
        .store
        .create(&user, input)
        .await
        .map_err(map_advisor_error)?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// A single investment by id
pub async fn get_investment(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
) -> Result<Json<InvestmentAsset>, ApiError> {
    let asset = state
        .store
        .get(&user, id)
        .await
        .map_err(map_advisor_error)?
        .ok_or_else(|| map_advisor_error(AdvisorError::NotFound(id)))?;
    Ok(Json(asset))
}

/// Full-record replacement from the edit form
pub async fn update_investment(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
    Json(input): Json<NewInvestment>,
) -> Result<Json<InvestmentAsset>, ApiError> {
    let asset = state
        .store
        .update(&user, id, input)
        .await
        .map_err(map_advisor_error)?;
    Ok(Json(asset))
}

/// Explicit delete action
pub async fn delete_investment(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete(&user, id)
        .await
        .map_err(map_advisor_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Aggregate metrics over the current collection
pub async fn portfolio_metrics(
    State(state): State<AppState>,
    UserId(user): UserId,
) -> Result<Json<AggregateMetrics>, ApiError> {
    let assets = state.store.list(&user).await.map_err(map_advisor_error)?;
    Ok(Json(aggregate(&assets)))
}

/// Historical valuations for the evolution chart
pub async fn list_snapshots(
    State(state): State<AppState>,
    UserId(user): UserId,
) -> Result<Json<Vec<PortfolioSnapshot>>, ApiError> {
    let snapshots = state
        .store
        .snapshots(&user)
        .await
        .map_err(map_advisor_error)?;
    Ok(Json(snapshots))
}

/// Append a valuation (called by the external snapshot process)
pub async fn record_snapshot(
    State(state): State<AppState>,
    UserId(user): UserId,
    Json(snapshot): Json<PortfolioSnapshot>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .record_snapshot(&user, snapshot)
        .await
        .map_err(map_advisor_error)?;
    Ok(StatusCode::CREATED)
}

/// Run the portfolio-analysis flow over the user's holdings
pub async fn analyze_portfolio_handler(
    State(state): State<AppState>,
    UserId(user): UserId,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<flows::PortfolioAnalysis>, ApiError> {
    let assets = state.store.list(&user).await.map_err(map_advisor_error)?;
    let options = GenerationOptions::for_model(state.model.clone());

    let analysis = flows::analyze_portfolio(
        state.provider.as_ref(),
        &options,
        &assets,
        &payload.financial_goals,
    )
    .await
    .map_err(map_advisor_error)?;

    Ok(Json(analysis))
}

/// Run the alert-generation flow over a completed analysis
pub async fn generate_alerts_handler(
    State(state): State<AppState>,
    UserId(_user): UserId,
    Json(payload): Json<GenerateAlertsRequest>,
) -> Result<Json<GenerateAlertsResponse>, ApiError> {
    let options = GenerationOptions::for_model(state.model.clone());

    let alerts = flows::generate_alerts(
        state.provider.as_ref(),
        &options,
        &payload.portfolio_analysis,
        &payload.risk_profile,
    )
    .await
    .map_err(map_advisor_error)?;

    Ok(Json(GenerateAlertsResponse { alerts }))
}

/// WebSocket pushing fresh aggregate metrics on every store change
pub async fn metrics_stream_handler(
    ws: WebSocketUpgrade,
    UserId(user): UserId,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| stream_metrics(socket, state, user))
}

async fn stream_metrics(mut socket: WebSocket, state: AppState, user: String) {
    let mut changes = state.store.subscribe();

    loop {
        let assets = match state.store.list(&user).await {
            Ok(assets) => assets,
            Err(e) => {
                tracing::error!("metrics stream list failed: {}", e);
                break;
            }
        };

        let metrics = aggregate(&assets);
        let payload = match serde_json::to_string(&metrics) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("metrics serialization failed: {}", e);
                break;
            }
        };

        if socket.send(Message::Text(payload.into())).await.is_err() {
            break;
        }

        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
        }
    }
}
