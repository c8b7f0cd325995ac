// Metrics endpoint

use crate::core::error::MonitoringError;
use crate::core::state::AppState;
use crate::models::api::ApiKeyQuery;
use crate::utils::auth::verify_api_key;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::warn;

/// Login, registration and page counters plus store sizes.
///
/// Requires the admin API key.
///
/// GET /metrics
pub async fn metrics_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ApiKeyQuery>,
) -> Result<Response, MonitoringError> {
    if !verify_api_key(&params.api_key, &state.config.admin.api_key) {
        warn!("Unauthorized metrics access attempt");
        return Err(MonitoringError::InvalidApiKey);
    }

    let snapshot = state
        .metrics
        .get_snapshot(&state.roster, &state.pages, &state.directory);

    Ok((StatusCode::OK, Json(snapshot)).into_response())
}
