// Centralized error handling for the portal

use crate::models::role::Role;
use crate::validation::email::EMAIL_FORMAT_HINT;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Coarse classification shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required form field was left blank
    MissingFields,
    /// Email format, password confirmation or password length rejected
    InvalidCredential,
    /// The operation does not apply to the page's current login state
    SessionState,
    /// Server-side limit reached; retrying later may succeed
    Unavailable,
}

/// Rejections produced by login, registration and dashboard routing.
///
/// Every variant leaves the portal state as it was before the call. The
/// `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    #[error("Please fill in all fields")]
    MissingCredentials,

    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    #[error("{}", role_fields_message(.0))]
    MissingRoleFields(Role),

    #[error("Invalid email format. Please use the format: {}", EMAIL_FORMAT_HINT)]
    InvalidEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Already logged in as {0}")]
    AlreadyAuthenticated(Role),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Registration is closed, try again later")]
    RegistrationClosed,
}

fn role_fields_message(role: &Role) -> &'static str {
    match role {
        Role::Student => "Please fill in all student-specific fields",
        Role::Alumni => "Please fill in all alumni-specific fields",
        Role::Faculty => "Please fill in department field",
    }
}

impl PortalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PortalError::MissingCredentials
            | PortalError::MissingRequiredFields
            | PortalError::MissingRoleFields(_) => ErrorKind::MissingFields,
            PortalError::InvalidEmail
            | PortalError::PasswordMismatch
            | PortalError::PasswordTooShort => ErrorKind::InvalidCredential,
            PortalError::AlreadyAuthenticated(_) | PortalError::NotAuthenticated => {
                ErrorKind::SessionState
            }
            PortalError::RegistrationClosed => ErrorKind::Unavailable,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Portal(#[from] PortalError),

    #[error("Missing x-portal-page header")]
    MissingPageToken,

    #[error("Unknown or expired page")]
    UnknownPage,

    #[error("Too many open pages, try again later")]
    PageLimitReached,

    #[error("Server busy, try again later")]
    ServerBusy,

    #[error("Not available to {0} accounts")]
    Forbidden(Role),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use crate::models::api::ErrorResponse;
        use axum::response::Json;

        let status = match &self {
            ApiError::Portal(PortalError::NotAuthenticated) => StatusCode::UNAUTHORIZED,
            ApiError::Portal(PortalError::AlreadyAuthenticated(_)) => StatusCode::CONFLICT,
            ApiError::Portal(PortalError::RegistrationClosed) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Portal(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingPageToken => StatusCode::BAD_REQUEST,
            ApiError::UnknownPage => StatusCode::NOT_FOUND,
            ApiError::PageLimitReached => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::ServerBusy => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum MonitoringError {
    #[error("Invalid API key")]
    InvalidApiKey,
}

impl IntoResponse for MonitoringError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            MonitoringError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Unauthorized"),
        };

        (status, message).into_response()
    }
}
