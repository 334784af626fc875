use analysis::{AnalysisRequest, AnalysisResult, Analyzer, GenerationRequest, GenerationResult};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::error::ApiError;
use crate::metrics::{Endpoint, Metrics, MetricsSnapshot, TimedOperation};

pub struct AppState {
    pub analyzer: Analyzer,
    pub metrics: Arc<Metrics>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // Wide open: fine for local development, not for production.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/analyze", post(analyze_text))
        .route("/generate", post(generate_text))
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn analyze_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(req) = payload?;
    if req.text.trim().is_empty() {
        return Err(ApiError::InvalidRequest("text must not be empty".to_string()));
    }

    let span = info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        analysis_type = %req.analysis_type,
    );

    async move {
        info!(text_len = req.text.len(), "Received analysis request");
        let timer = TimedOperation::start();

        let outcome = state.analyzer.analyze(&req.text, &req.analysis_type).await;
        state
            .metrics
            .record_request(Endpoint::Analyze, timer.elapsed(), outcome.is_ok());

        match outcome {
            Ok(result) => {
                state.metrics.record_suggestions(result.suggestions.len());
                Ok(Json(result))
            }
            Err(e) => {
                error!(error = %e, "Error in analyze_text");
                Err(e.into())
            }
        }
    }
    .instrument(span)
    .await
}

async fn generate_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    let Json(req) = payload?;

    let span = info_span!(
        "generate",
        request_id = %Uuid::new_v4(),
        max_length = ?req.max_length,
    );

    async move {
        let timer = TimedOperation::start();

        let outcome = state.analyzer.generate(&req.prompt, req.max_length).await;
        state
            .metrics
            .record_request(Endpoint::Generate, timer.elapsed(), outcome.is_ok());

        match outcome {
            Ok(generated_text) => Ok(Json(GenerationResult { generated_text })),
            Err(e) => {
                error!(error = %e, "Error in generate_text");
                Err(e.into())
            }
        }
    }
    .instrument(span)
    .await
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
