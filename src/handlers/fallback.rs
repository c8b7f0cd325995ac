use crate::models::api::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

pub async fn fallback_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: "Invalid endpoint. Valid endpoints: /health, /pages, /session, /login, \
                    /register, /logout, /dashboard, /directory"
                .to_string(),
        }),
    )
        .into_response()
}
