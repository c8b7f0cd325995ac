// HTTP routes configuration

use crate::core::error::ApiError;
use crate::core::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

pub fn build_router(state: Arc<AppState>) -> Router {
    let permits = Arc::new(Semaphore::new(state.config.server.max_connections));

    let router = Router::new()
        // Public endpoints
        .route("/health", get(crate::handlers::health::health_handler))
        .route(
            "/pages",
            post(crate::handlers::pages::open_page_handler)
                .delete(crate::handlers::pages::close_page_handler),
        )

        // Page endpoints (require x-portal-page)
        .route("/session", get(crate::handlers::pages::session_handler))
        .route("/login", post(crate::handlers::auth::login_handler))
        .route("/register", post(crate::handlers::auth::register_handler))
        .route("/logout", post(crate::handlers::auth::logout_handler))
        .route("/dashboard", get(crate::handlers::dashboard::dashboard_handler))
        .route("/directory", get(crate::handlers::directory::directory_handler))

        // Admin endpoints (require API key)
        .route("/metrics", get(crate::handlers::metrics::metrics_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state);

    with_request_limit(router, permits)
}

/// Serve at most `permits` requests at once; the rest are shed with 503
fn with_request_limit(router: Router, permits: Arc<Semaphore>) -> Router {
    router.layer(middleware::from_fn_with_state(permits, limit_in_flight))
}

async fn limit_in_flight(
    State(permits): State<Arc<Semaphore>>,
    request: Request,
    next: Next,
) -> Response {
    let Ok(_permit) = permits.try_acquire_owned() else {
        warn!(path = %request.uri().path(), "Request limit reached, shedding request");
        return ApiError::ServerBusy.into_response();
    };

    next.run(request).await
}
