use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::{PageOpenedResponse, PageStateResponse, SuccessResponse};
use crate::portal::controller::AuthState;
use crate::utils::token::is_well_formed;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Header naming the page a request belongs to
pub const PAGE_HEADER: &str = "x-portal-page";

/// Read the page token from the request headers
pub fn page_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let token = headers
        .get(PAGE_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingPageToken)?;

    if !is_well_formed(token) {
        return Err(ApiError::UnknownPage);
    }

    Ok(token)
}

/// Open a new anonymous page
///
/// POST /pages
pub async fn open_page_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let Some(token) = state.pages.open(Arc::clone(&state.roster)) else {
        warn!(
            open_pages = state.pages.len(),
            max_pages = state.config.portal.max_pages,
            "Page limit reached"
        );
        return Err(ApiError::PageLimitReached);
    };

    debug!(open_pages = state.pages.len(), "Page opened");

    Ok((
        StatusCode::CREATED,
        Json(PageOpenedResponse {
            success: true,
            page: token,
        }),
    )
        .into_response())
}

/// Close a page, discarding its session
///
/// DELETE /pages
pub async fn close_page_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let token = page_token(&headers)?;

    if !state.pages.close(token) {
        return Err(ApiError::UnknownPage);
    }

    info!(open_pages = state.pages.len(), "Page closed");

    Ok((
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            message: "Page closed".to_string(),
        }),
    )
        .into_response())
}

/// Current login state of the page
///
/// GET /session
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let token = page_token(&headers)?;

    let body = state
        .pages
        .with_page(token, |portal| match portal.state() {
            AuthState::Anonymous { error } => PageStateResponse::Anonymous {
                error: error.as_ref().map(|e| e.to_string()),
            },
            AuthState::Authenticated(session) => PageStateResponse::Authenticated {
                session: session.clone(),
            },
        })
        .ok_or(ApiError::UnknownPage)?;

    Ok((StatusCode::OK, Json(body)).into_response())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::config::tests::test_config;
    use crate::core::startup::builtin_directory;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use http_body_util::BodyExt;

    pub(crate) fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new(test_config(), builtin_directory()))
    }

    pub(crate) fn open_page(state: &Arc<AppState>) -> (String, HeaderMap) {
        let token = state.pages.open(Arc::clone(&state.roster)).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(PAGE_HEADER, HeaderValue::from_str(&token).unwrap());
        (token, headers)
    }

    pub(crate) async fn body_json(response: Response) -> serde_json::Value {
        let bytes = Body::new(response.into_body())
            .collect()
            .await
            .unwrap()
            .to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_page_token_missing() {
        let headers = HeaderMap::new();
        assert!(matches!(page_token(&headers), Err(ApiError::MissingPageToken)));
    }

    #[test]
    fn test_page_token_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(PAGE_HEADER, HeaderValue::from_static("not-a-token"));
        assert!(matches!(page_token(&headers), Err(ApiError::UnknownPage)));
    }

    #[tokio::test]
    async fn test_open_page() {
        let state = create_test_state();

        let response = open_page_handler(State(state.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        let token = body["page"].as_str().unwrap();
        assert!(is_well_formed(token));
        assert_eq!(state.pages.len(), 1);
    }

    #[tokio::test]
    async fn test_open_page_limit() {
        let state = create_test_state();
        for _ in 0..state.config.portal.max_pages {
            open_page_handler(State(state.clone())).await.unwrap();
        }

        let result = open_page_handler(State(state)).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_new_page_is_anonymous() {
        let state = create_test_state();
        let (_, headers) = open_page(&state);

        let response = session_handler(State(state), headers).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["state"], "anonymous");
        assert!(body["error"].is_null());
    }

    #[tokio::test]
    async fn test_close_page() {
        let state = create_test_state();
        let (_, headers) = open_page(&state);

        let response = close_page_handler(State(state.clone()), headers.clone())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.pages.is_empty());

        let result = session_handler(State(state), headers).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
