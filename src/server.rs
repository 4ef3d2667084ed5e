//! HTTP server for the pair query API.
//!
//! [`serve`] opens the database once, wraps it in a [`PairQueryService`], and mounts
//! the routes from [`router`]:
//!
//! - `POST /api/drug-disease-pairs` — filtered, sorted, paginated pair query
//! - `GET /api/drug-disease-pairs/stats` — table summary
//! - `GET /health` — liveness check

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::config::RobokopConfig;
use crate::db;
use crate::error::PairsError;
use crate::pairs::request::parse_query_body;
use crate::pairs::stats::{pair_stats, PairStats};
use crate::pairs::{PairQueryService, QueryResult};

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: PairQueryService,
    pub max_limit: u32,
}

impl AppState {
    pub fn new(service: PairQueryService, max_limit: u32) -> Self {
        Self { service, max_limit }
    }
}

/// Error wrapper mapping [`PairsError`] to an HTTP response.
pub struct ApiError(PairsError);

impl From<PairsError> for ApiError {
    fn from(err: PairsError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(PairsError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            PairsError::Validation(message) => {
                tracing::warn!(%message, "rejected pair query");
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            err => {
                tracing::error!(error = %err, "pair query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "failed to query drug-disease pairs" })),
                )
                    .into_response()
            }
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/drug-disease-pairs", post(handle_query))
        .route("/api/drug-disease-pairs/stats", get(handle_stats))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_query(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<QueryResult>, ApiError> {
    let Json(body) = body?;
    let request = parse_query_body(&body, state.max_limit)?;
    let result = state.service.query(request).await?;
    Ok(Json(result))
}

async fn handle_stats(State(state): State<AppState>) -> Result<Json<PairStats>, ApiError> {
    let stats = state
        .service
        .with_conn(pair_stats)
        .await?;
    Ok(Json(stats))
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Open the database and serve the API until Ctrl-C.
pub async fn serve(config: RobokopConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let pool = db::open_read_pool(&db_path, config.storage.read_pool_size)?;
    tracing::info!(db = %db_path.display(), "database ready");

    let service = PairQueryService::new(pool);
    let app = router(AppState::new(service, config.pairs.max_limit));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening at http://{bind_addr}/api/drug-disease-pairs");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down server");
        })
        .await?;

    Ok(())
}
