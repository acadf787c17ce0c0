pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;
use crate::{export, extract, generation, store, view};

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Draft state
        .route(
            "/api/v1/state",
            get(store::handlers::handle_get_state).delete(store::handlers::handle_reset),
        )
        .route("/api/v1/draft", patch(store::handlers::handle_patch_draft))
        // Extraction
        .route(
            "/api/v1/resume/upload",
            post(extract::handlers::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Generation
        .route("/api/v1/generate", post(generation::handlers::handle_generate))
        // Versions, selection and diff
        .route("/api/v1/versions", get(view::handlers::handle_list_versions))
        .route("/api/v1/versions/:id", get(view::handlers::handle_get_version))
        .route(
            "/api/v1/versions/:id/select",
            put(view::handlers::handle_select_version),
        )
        .route("/api/v1/diff", get(view::handlers::handle_diff))
        // Export
        .route(
            "/api/v1/versions/:id/export/:format",
            get(export::handlers::handle_export),
        )
        .with_state(state)
}
