//! HTTP routes and handlers
//!
//! CPU-bound ranking and the blocking carbon-intensity call run on the
//! blocking pool via `spawn_blocking`; handlers only await them.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use sustainrec::data::MaterialRecord;
use sustainrec::footprint::{calculate, FoodProfile, FootprintInput, FootprintReport};
use sustainrec::recommend::AttributeQuery;
use sustainrec::SustainError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::intensity::IntensityReading;
use super::types::{
    AlternativesParams, CalculateRequest, ErrorResponse, FeatureRecommendationRequest,
    FeatureRecommendationResponse, HealthResponse, RecommendParams, ServerState, StatusMessage,
};

type AppState = Arc<ServerState>;

/// Handler failure, rendered as a JSON [`ErrorResponse`]
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or invalid input (400)
    BadRequest(String),
    /// Third-party service failed (502)
    Upstream(String),
    /// Feature switched off (503)
    Unavailable(String),
    /// Anything else (500); the detail is logged, not returned
    Internal(String),
}

impl From<SustainError> for ApiError {
    fn from(err: SustainError) -> Self {
        if err.is_validation() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("Task failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("bad_request", message),
            ),
            Self::Upstream(message) => {
                tracing::warn!(error = %message, "upstream lookup failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new("upstream_unavailable", message),
                )
            }
            Self::Unavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("unavailable", message),
            ),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal_error", "internal server error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Build the axum Router for the recommendation API.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/recommend",
            get(recommend_by_attributes).post(recommend_by_features),
        )
        .route("/alternatives", get(alternatives))
        .route("/calculate", post(calculate_footprint))
        .route("/carbon-intensity", get(carbon_intensity));

    if state.config.metrics {
        router = router.route("/metrics", get(metrics));
    }

    let mut router = router
        .layer(middleware::from_fn_with_state(state.clone(), track_metrics))
        .layer(TimeoutLayer::new(state.config.timeout()))
        .layer(TraceLayer::new_for_http());

    if state.config.cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.with_state(state)
}

async fn track_metrics(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    state.metrics.record_status(response.status().as_u16());
    response
}

async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Sustainable Recommender API is running!".to_string(),
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.health())
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.prometheus_output(),
    )
}

async fn recommend_by_attributes(
    State(state): State<AppState>,
    params: Result<Query<RecommendParams>, QueryRejection>,
) -> ApiResult<Vec<MaterialRecord>> {
    let Query(params) = params?;
    let query = AttributeQuery::from_params(
        params.material_type.as_deref(),
        params.recyclable.as_deref(),
        params.compostable.as_deref(),
    )?;

    let worker = state.clone();
    let outcome = tokio::task::spawn_blocking(move || worker.recommender.recommend(&query)).await?;
    tracing::debug!(stage = outcome.stage(), count = outcome.records().len(), "recommend");

    let records = outcome.into_records();
    state.metrics.record_recommendations(records.len());
    Ok(Json(records))
}

async fn recommend_by_features(
    State(state): State<AppState>,
    payload: Result<Json<FeatureRecommendationRequest>, JsonRejection>,
) -> ApiResult<FeatureRecommendationResponse> {
    let Json(request) = payload?;
    let features = request.features()?;

    let worker = state.clone();
    let ranked =
        tokio::task::spawn_blocking(move || worker.recommender.similar_by_features(&features))
            .await??;

    state.metrics.record_recommendations(ranked.len());
    Ok(Json(FeatureRecommendationResponse {
        query: request.material,
        recommendations: ranked,
    }))
}

async fn alternatives(
    State(state): State<AppState>,
    params: Result<Query<AlternativesParams>, QueryRejection>,
) -> ApiResult<Vec<MaterialRecord>> {
    let Query(params) = params?;
    let material = params
        .material
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("query parameter 'material' is required".into()))?;

    let worker = state.clone();
    let records =
        tokio::task::spawn_blocking(move || worker.recommender.alternatives(&material)).await?;
    state.metrics.record_recommendations(records.len());
    Ok(Json(records))
}

async fn calculate_footprint(
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<FootprintReport> {
    let Json(request) = payload?;
    let food: FoodProfile = request.food.parse()?;
    let report = calculate(&FootprintInput::new(
        request.distance,
        request.electricity,
        food,
    ))?;
    Ok(Json(report))
}

async fn carbon_intensity(State(state): State<AppState>) -> ApiResult<IntensityReading> {
    if state.config.offline {
        return Err(ApiError::Unavailable(
            "carbon intensity lookup is disabled (offline mode)".into(),
        ));
    }

    let worker = state.clone();
    match tokio::task::spawn_blocking(move || worker.intensity.fetch()).await? {
        Ok(reading) => Ok(Json(reading)),
        Err(err) => {
            state.metrics.record_intensity_failure();
            Err(ApiError::Upstream(err.to_string()))
        }
    }
}
