use axum::extract::State;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, ApiResult, ok};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub database: bool,
}

/// Service and database health
///
/// GET /api/v1/health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Health status", body = ApiResponse<HealthResponse>)
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    let database = state.db.health_check().await.is_ok();
    if !database {
        tracing::warn!("health check: database unreachable");
    }

    ok(HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}
