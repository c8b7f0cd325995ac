use crate::core::error::{ApiError, PortalError};
use crate::core::state::AppState;
use crate::handlers::pages::page_token;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Sidebar entry to open; the overview when absent or unknown
    pub section: Option<String>,
}

/// Shell for the signed-in role
///
/// GET /dashboard
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, ApiError> {
    let token = page_token(&headers)?;

    let dashboard = state
        .pages
        .with_page(token, |portal| portal.dashboard())
        .ok_or(ApiError::UnknownPage)?
        .ok_or(PortalError::NotAuthenticated)?;

    let dashboard = match query.section.as_deref() {
        Some(section) => dashboard.select(section),
        None => dashboard,
    };

    Ok((StatusCode::OK, Json(dashboard)).into_response())
}
