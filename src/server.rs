//! JSON HTTP server.
//!
//! Exposes the shared [`CaseService`] to frontends and prompt builders. The
//! service is built once by the caller and injected here; handlers only read
//! from it.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check with corpus and index status |
//! | `POST` | `/search` | Ranked cases for `{ "query", "top_k"? , "explain"? }` |
//! | `POST` | `/query` | Retrieved case names and rendered context for `{ "question", "top_k"? }` |
//! | `GET`  | `/cases/{index}` | One case record by corpus position, as loaded |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "question is required" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use lawbot_core::models::CaseRecord;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::context::QueryContext;
use crate::search::search_cases;
use crate::service::CaseService;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    service: Arc<CaseService>,
}

/// Build the router over an already-constructed service.
pub fn router(service: Arc<CaseService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/search", post(handle_search))
        .route("/query", post(handle_query))
        .route("/cases/{index}", get(handle_get_case))
        .layer(cors)
        .with_state(AppState { service })
}

/// Bind to `bind` and serve until the process is terminated.
pub async fn run_server(bind: &str, service: Arc<CaseService>) -> anyhow::Result<()> {
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    cases: usize,
    vocabulary: usize,
    index_ready: bool,
    loaded_at: String,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = &state.service;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cases: service.len(),
        vocabulary: service.index_stats().map(|s| s.vocabulary).unwrap_or(0),
        index_ready: service.is_index_ready(),
        loaded_at: service
            .loaded_at()
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string(),
    })
}

// ============ POST /search ============

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default)]
    query: String,
    #[serde(default)]
    top_k: Option<usize>,
    #[serde(default)]
    explain: bool,
}

async fn handle_search(
    State(state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> Json<serde_json::Value> {
    let service = &state.service;
    let top_k = body.top_k.unwrap_or(service.params().top_k);
    let results = search_cases(service, &body.query, top_k, body.explain);
    debug!("search {:?} -> {} results", body.query, results.len());
    let response = serde_json::json!({ "results": results });
    Json(response)
}

// ============ POST /query ============

#[derive(Deserialize)]
struct QueryBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    top_k: Option<usize>,
}

/// Retrieval step of the question-answering flow: finds related cases and
/// renders the context a generative model would be prompted with.
async fn handle_query(
    State(state): State<AppState>,
    Json(body): Json<QueryBody>,
) -> Result<Json<QueryContext>, AppError> {
    let question = body
        .question
        .filter(|q| !q.is_empty())
        .ok_or_else(|| bad_request("question is required"))?;

    let service = &state.service;
    let top_k = body.top_k.unwrap_or(service.params().top_k);
    let cases = service.search(&question, top_k);
    info!("Retrieved {} cases for question", cases.len());

    Ok(Json(QueryContext::build(&question, &cases)))
}

// ============ GET /cases/{index} ============

/// The stored record, exactly as loaded.
async fn handle_get_case(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<CaseRecord>, AppError> {
    let case = state
        .service
        .get(index)
        .ok_or_else(|| not_found(format!("case not found: {}", index)))?;
    Ok(Json(case.clone()))
}
