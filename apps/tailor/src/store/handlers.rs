//! Axum route handlers for reading, editing and resetting the draft state.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{AppSnapshot, Model};
use crate::state::AppState;
use crate::store::{lock, Action};
use crate::view::{lock_view, version_chips, VersionChip};

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub original_resume: String,
    pub job_description: String,
    pub api_key_set: bool,
    /// Last four characters of the key, for display only.
    pub api_key_hint: Option<String>,
    pub selected_model: Model,
    pub available_models: Vec<Model>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub versions: Vec<VersionChip>,
    pub selected_version: Option<String>,
}

/// Fields omitted from the request body are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct DraftPatch {
    pub original_resume: Option<String>,
    pub job_description: Option<String>,
    pub api_key: Option<String>,
    pub selected_model: Option<String>,
}

impl DraftPatch {
    fn into_actions(self) -> Result<Vec<Action>, AppError> {
        let mut actions = Vec::new();
        if let Some(resume) = self.original_resume {
            actions.push(Action::SetOriginalResume(resume));
        }
        if let Some(jd) = self.job_description {
            actions.push(Action::SetJobDescription(jd));
        }
        if let Some(key) = self.api_key {
            actions.push(Action::SetApiKey(key));
        }
        if let Some(model) = self.selected_model {
            let model = model
                .parse::<Model>()
                .map_err(|e| AppError::Validation(e.to_string()))?;
            actions.push(Action::SetSelectedModel(model));
        }
        Ok(actions)
    }
}

pub fn build_state_response(state: &AppState) -> StateResponse {
    let snapshot: AppSnapshot = lock(&state.store).snapshot().clone();
    let mut view = lock_view(&state.view);
    view.sync(&snapshot.generated_versions);

    let draft = snapshot.draft;
    let api_key_hint = (!draft.api_key.is_empty()).then(|| {
        let chars: Vec<char> = draft.api_key.chars().collect();
        let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        format!("…{tail}")
    });

    StateResponse {
        original_resume: draft.original_resume,
        job_description: draft.job_description,
        api_key_set: !draft.api_key.is_empty(),
        api_key_hint,
        selected_model: draft.selected_model,
        available_models: Model::ALL.to_vec(),
        is_loading: draft.is_loading,
        error: draft.error,
        versions: version_chips(&snapshot.generated_versions, view.selected()),
        selected_version: view.selected().map(str::to_string),
    }
}

/// GET /api/v1/state
pub async fn handle_get_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(build_state_response(&state))
}

/// PATCH /api/v1/draft
pub async fn handle_patch_draft(
    State(state): State<AppState>,
    Json(patch): Json<DraftPatch>,
) -> Result<Json<StateResponse>, AppError> {
    let actions = patch.into_actions()?;
    {
        let mut store = lock(&state.store);
        for action in actions {
            store.dispatch(action)?;
        }
    }
    Ok(Json(build_state_response(&state)))
}

/// DELETE /api/v1/state
///
/// Clears every field and the whole version history.
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<StateResponse>, AppError> {
    lock(&state.store).reset()?;
    Ok(Json(build_state_response(&state)))
}
