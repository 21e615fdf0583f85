pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::review::handlers as review;
use crate::session::handlers as session;
use crate::state::AppState;

/// Multipart overhead on top of the two document uploads.
const MULTIPART_SLACK_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes * 2 + MULTIPART_SLACK_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/documents",
            post(session::handle_upload_documents),
        )
        .route("/api/v1/sessions/:id/chat", post(session::handle_chat))
        // Review
        .route("/api/v1/sessions/:id/report", post(review::handle_report))
        .route(
            "/api/v1/sessions/:id/actions/:action",
            post(review::handle_action),
        )
        .route("/api/v1/respond", post(review::handle_respond))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
