//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generate;
use crate::models::GeneratedVersion;
use crate::state::AppState;
use crate::store::lock;
use crate::view::lock_view;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub version: GeneratedVersion,
    pub selected_version: Option<String>,
}

/// POST /api/v1/generate
///
/// Tailors the current draft resume to the current job description and
/// appends the result to the version history.
pub async fn handle_generate(
    State(state): State<AppState>,
) -> Result<Json<GenerateResponse>, AppError> {
    let version = generate(&state.store, state.backend.as_ref()).await?;

    let versions = lock(&state.store).snapshot().generated_versions.clone();
    let mut view = lock_view(&state.view);
    view.sync(&versions);

    Ok(Json(GenerateResponse {
        version,
        selected_version: view.selected().map(str::to_string),
    }))
}
