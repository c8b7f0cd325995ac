use crate::core::error::{ApiError, PortalError};
use crate::core::state::AppState;
use crate::handlers::pages::page_token;
use crate::models::api::{LoginRequest, RegisteredResponse, SessionResponse, SuccessResponse};
use crate::models::registration::RegistrationForm;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Sign the page in
///
/// POST /login
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let token = page_token(&headers)?;
    let Json(request) = payload?;

    let result = state
        .pages
        .with_page(token, |portal| {
            portal.login(request.role, &request.email, &request.password)
        })
        .ok_or(ApiError::UnknownPage)?;

    // A second login on a signed-in page is a state conflict, not a failed attempt
    match &result {
        Ok(_) => state.metrics.record_login(true),
        Err(PortalError::AlreadyAuthenticated(_)) => {}
        Err(_) => state.metrics.record_login(false),
    }

    match result {
        Ok(session) => {
            info!(
                role = %session.role,
                registered = session.profile.is_some(),
                "Login succeeded"
            );

            Ok((
                StatusCode::OK,
                Json(SessionResponse {
                    success: true,
                    session,
                }),
            )
                .into_response())
        }
        Err(e) => {
            warn!(role = %request.role, kind = ?e.kind(), error = %e, "Login rejected");
            Err(e.into())
        }
    }
}

/// Validate a registration and add it to the roster
///
/// POST /register
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<RegistrationForm>, JsonRejection>,
) -> Result<Response, ApiError> {
    let token = page_token(&headers)?;
    let Json(form) = payload?;

    let result = state
        .pages
        .with_page(token, |portal| portal.register(form))
        .ok_or(ApiError::UnknownPage)?;

    match &result {
        Ok(_) => state.metrics.record_registration(true),
        Err(PortalError::RegistrationClosed) => {}
        Err(_) => state.metrics.record_registration(false),
    }

    match result {
        Ok(next) => {
            info!(registered_users = state.roster.len(), "Registration accepted");

            Ok((
                StatusCode::CREATED,
                Json(RegisteredResponse {
                    success: true,
                    message: "Your account has been created successfully. You can now login to access the alumni portal.".to_string(),
                    next,
                }),
            )
                .into_response())
        }
        Err(e) => {
            warn!(kind = ?e.kind(), error = %e, "Registration rejected");
            Err(e.into())
        }
    }
}

/// Drop the page's session
///
/// POST /logout
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let token = page_token(&headers)?;

    let was_authenticated = state
        .pages
        .with_page(token, |portal| {
            let was_authenticated = portal.is_authenticated();
            portal.logout();
            was_authenticated
        })
        .ok_or(ApiError::UnknownPage)?;

    if was_authenticated {
        state.metrics.record_logout();
        info!("Logged out");
    }

    Ok((
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
        .into_response())
}
