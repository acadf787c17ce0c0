//! Axum route handlers for the version list, selection and diff.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::GeneratedVersion;
use crate::state::AppState;
use crate::store::lock;
use crate::view::{lock_view, side_by_side_diff, version_chips, DiffRow, VersionChip};

#[derive(Debug, Serialize)]
pub struct VersionListResponse {
    pub versions: Vec<VersionChip>,
    pub selected_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DiffQuery {
    /// Defaults to the selected version.
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub version_id: String,
    pub rows: Vec<DiffRow>,
}

fn versions(state: &AppState) -> Vec<GeneratedVersion> {
    lock(&state.store).snapshot().generated_versions.clone()
}

/// GET /api/v1/versions
pub async fn handle_list_versions(State(state): State<AppState>) -> Json<VersionListResponse> {
    let versions = versions(&state);
    let mut view = lock_view(&state.view);
    view.sync(&versions);

    Json(VersionListResponse {
        versions: version_chips(&versions, view.selected()),
        selected_version: view.selected().map(str::to_string),
    })
}

/// GET /api/v1/versions/:id
pub async fn handle_get_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GeneratedVersion>, AppError> {
    versions(&state)
        .into_iter()
        .find(|v| v.id == id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Version {id} not found")))
}

/// PUT /api/v1/versions/:id/select
pub async fn handle_select_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VersionListResponse>, AppError> {
    let versions = versions(&state);
    let mut view = lock_view(&state.view);
    view.select(&versions, &id)?;

    Ok(Json(VersionListResponse {
        versions: version_chips(&versions, view.selected()),
        selected_version: view.selected().map(str::to_string),
    }))
}

/// GET /api/v1/diff
///
/// Side-by-side diff of the original resume against the selected version
/// (or `?version=<id>`).
pub async fn handle_diff(
    State(state): State<AppState>,
    Query(query): Query<DiffQuery>,
) -> Result<Json<DiffResponse>, AppError> {
    let snapshot = lock(&state.store).snapshot().clone();

    let version_id = match query.version {
        Some(id) => id,
        None => {
            let mut view = lock_view(&state.view);
            view.sync(&snapshot.generated_versions);
            view.selected()
                .map(str::to_string)
                .ok_or_else(|| AppError::NotFound("No version selected".to_string()))?
        }
    };

    let version = snapshot
        .find_version(&version_id)
        .ok_or_else(|| AppError::NotFound(format!("Version {version_id} not found")))?;

    Ok(Json(DiffResponse {
        rows: side_by_side_diff(&snapshot.draft.original_resume, &version.tailored_resume),
        version_id,
    }))
}
