use crate::core::error::{ApiError, PortalError};
use crate::core::state::AppState;
use crate::handlers::pages::page_token;
use crate::models::api::{DirectoryEntry, DirectoryQuery, DirectoryResponse};
use crate::models::role::Role;
use crate::stores::directory::{DirectoryFilter, SortKey};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Build a filter from query parameters
pub fn parse_filter(query: DirectoryQuery) -> Result<DirectoryFilter, ApiError> {
    let sort = match query.sort.as_deref().map(str::trim) {
        None => SortKey::default(),
        Some(value) => SortKey::parse(value)
            .ok_or_else(|| ApiError::InvalidParameter(format!("unknown sort '{}'", value)))?,
    };

    Ok(DirectoryFilter {
        search: DirectoryFilter::select(query.search),
        branch: DirectoryFilter::select(query.branch),
        graduation_year: DirectoryFilter::select(query.year),
        company: DirectoryFilter::select(query.company),
        sort,
    })
}

/// Search the alumni directory
///
/// GET /directory
///
/// Open to faculty and student sessions only.
pub async fn directory_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DirectoryQuery>,
) -> Result<Response, ApiError> {
    let token = page_token(&headers)?;

    let role = state
        .pages
        .with_page(token, |portal| portal.session().map(|s| s.role))
        .ok_or(ApiError::UnknownPage)?
        .ok_or(PortalError::NotAuthenticated)?;

    if role == Role::Alumni {
        return Err(ApiError::Forbidden(role));
    }

    let filter = parse_filter(query)?;
    let results = state.directory.search(&filter);

    debug!(
        role = %role,
        matches = results.len(),
        sort = ?filter.sort,
        "Directory searched"
    );

    let alumni: Vec<DirectoryEntry> = results
        .into_iter()
        .map(|alumni| DirectoryEntry {
            alumni,
            engagement_tier: alumni.engagement_tier(),
        })
        .collect();

    Ok((
        StatusCode::OK,
        Json(DirectoryResponse {
            success: true,
            total: alumni.len(),
            alumni,
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::pages::tests::{body_json, create_test_state, open_page};

    async fn signed_in(role: Role) -> (Arc<AppState>, HeaderMap) {
        let state = create_test_state();
        let (token, headers) = open_page(&state);
        state
            .pages
            .with_page(&token, |p| p.login(role, "23pa1a12e7@vishnu.edu.in", "pw"))
            .unwrap()
            .unwrap();
        (state, headers)
    }

    #[test]
    fn test_parse_filter_placeholders() {
        let filter = parse_filter(DirectoryQuery {
            search: Some("  ".to_string()),
            branch: Some("All Branches".to_string()),
            year: Some("2020".to_string()),
            company: None,
            sort: Some("engagement".to_string()),
        })
        .unwrap();

        assert!(filter.search.is_none());
        assert!(filter.branch.is_none());
        assert_eq!(filter.graduation_year.as_deref(), Some("2020"));
        assert_eq!(filter.sort, SortKey::Engagement);
    }

    #[test]
    fn test_parse_filter_unknown_sort() {
        let query = DirectoryQuery {
            sort: Some("salary".to_string()),
            ..Default::default()
        };
        assert!(matches!(parse_filter(query), Err(ApiError::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn test_directory_for_faculty() {
        let (state, headers) = signed_in(Role::Faculty).await;

        let query = DirectoryQuery {
            sort: Some("engagement".to_string()),
            ..Default::default()
        };
        let response = directory_handler(State(state), headers, Query(query))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["total"], 4);
        assert_eq!(body["alumni"][0]["name"], "Sarah Johnson");
        assert_eq!(body["alumni"][0]["engagementTier"], "high");
        assert_eq!(body["alumni"][3]["engagementTier"], "medium");
    }

    #[tokio::test]
    async fn test_directory_search_by_skill() {
        let (state, headers) = signed_in(Role::Student).await;

        let query = DirectoryQuery {
            search: Some("python".to_string()),
            ..Default::default()
        };
        let response = directory_handler(State(state), headers, Query(query))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["alumni"][0]["name"], "Raj Patel");
    }

    #[tokio::test]
    async fn test_directory_forbidden_for_alumni() {
        let (state, headers) = signed_in(Role::Alumni).await;

        let result = directory_handler(State(state), headers, Query(DirectoryQuery::default())).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_directory_requires_login() {
        let state = create_test_state();
        let (_, headers) = open_page(&state);

        let result = directory_handler(State(state), headers, Query(DirectoryQuery::default())).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
