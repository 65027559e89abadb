//! HTTP Endpoints
//!
//! REST API for the dictionary. Public routes live under `/api`.

use std::time::{Duration, Instant};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, MatchedPath, Query, Request, State,
    },
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use bangla_dict_core::{StatusCheck, TranslationRecord};

use crate::metrics::{metrics_handler, record_request, record_translation};
use crate::state::AppState;
use crate::ServerError;

const DEFAULT_HISTORY_LIMIT: usize = 50;
const STATUS_LIST_LIMIT: usize = 1000;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);

    let mut router = Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/translate", post(translate))
        .route("/api/translations", get(list_translations))
        .route("/api/dictionary/stats", get(dictionary_stats))
        .route("/api/status", get(list_status_checks).post(create_status_check))
        .route("/health", get(health_check));

    if config.observability.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    router
        .route_layer(middleware::from_fn(track_requests))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, every origin is allowed
/// - If cors_origins is empty or contains `*`, every origin is allowed
/// - Otherwise only the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled || origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("All configured CORS origins are invalid, falling back to localhost");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn track_requests(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(route, response.status().as_u16());
    response
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "English to Bengali AI Dictionary API" }))
}

#[derive(Debug, Deserialize)]
struct TranslateRequest {
    word: String,
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslationRecord>, ServerError> {
    let Json(request) = payload?;
    let start = Instant::now();

    let record = state.resolver.resolve(&request.word).await?;

    record_translation(record.source, start.elapsed().as_secs_f64() * 1000.0);
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

async fn list_translations(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<TranslationRecord>>, ServerError> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let records = state
        .resolver
        .recent(limit)
        .await
        .map_err(|e| ServerError::History(e.to_string()))?;

    Ok(Json(records))
}

/// Stats failures are reported in the body with a 200
async fn dictionary_stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    match state.resolver.stats().await {
        Ok(stats) => Json(serde_json::to_value(stats).unwrap_or_default()),
        Err(e) => {
            tracing::error!(error = %e, "Stats query failed");
            Json(serde_json::json!({ "error": "Unable to fetch statistics" }))
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusCheckCreate {
    client_name: String,
}

async fn create_status_check(
    State(state): State<AppState>,
    payload: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> Result<Json<StatusCheck>, ServerError> {
    let Json(request) = payload?;
    let check = StatusCheck::new(request.client_name);

    state
        .status_store
        .save(&check)
        .await
        .map_err(|e| ServerError::Persistence(e.to_string()))?;

    Ok(Json(check))
}

async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ServerError> {
    let checks = state
        .status_store
        .list(STATUS_LIST_LIMIT)
        .await
        .map_err(|e| ServerError::Persistence(e.to_string()))?;

    Ok(Json(checks))
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "persistence": if state.is_distributed() { "scylla" } else { "memory" },
            "translator": state.resolver.translator_name(),
            "offline_words": state.resolver.dictionary().len(),
        })),
    )
}
