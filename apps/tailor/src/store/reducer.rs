//! Point mutations over the persisted snapshot, expressed as a pure reducer.

use crate::models::{AppSnapshot, GeneratedVersion, Model};

/// Every state change the application can make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetApiKey(String),
    SetOriginalResume(String),
    SetJobDescription(String),
    SetSelectedModel(Model),
    /// Trusted: the generation workflow has already validated the reply.
    AddGeneratedVersion(GeneratedVersion),
    SetIsLoading(bool),
    SetError(Option<String>),
    /// Back to the initial state. The busy flag is owned by the in-flight
    /// request's guard and survives.
    ClearState,
}

pub fn reduce(mut state: AppSnapshot, action: Action) -> AppSnapshot {
    match action {
        Action::SetApiKey(key) => state.draft.api_key = key,
        Action::SetOriginalResume(resume) => state.draft.original_resume = resume,
        Action::SetJobDescription(jd) => state.draft.job_description = jd,
        Action::SetSelectedModel(model) => state.draft.selected_model = model,
        Action::AddGeneratedVersion(version) => state.generated_versions.push(version),
        Action::SetIsLoading(loading) => state.draft.is_loading = loading,
        Action::SetError(error) => state.draft.error = error,
        Action::ClearState => {
            let mut cleared = AppSnapshot::initial();
            cleared.draft.is_loading = state.draft.is_loading;
            return cleared;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(id: &str) -> GeneratedVersion {
        GeneratedVersion {
            id: id.to_string(),
            tailored_resume: format!("# Resume {id}"),
            explanation: "- tightened summary".to_string(),
            created_at: 1_718_000_000_000,
        }
    }

    #[test]
    fn test_point_mutators_touch_only_their_field() {
        let state = reduce(AppSnapshot::initial(), Action::SetJobDescription("Rust".into()));
        assert_eq!(state.draft.job_description, "Rust");
        assert!(state.draft.original_resume.is_empty());
        assert!(state.draft.api_key.is_empty());

        let state = reduce(state, Action::SetSelectedModel(Model::Gpt4Turbo));
        assert_eq!(state.draft.selected_model, Model::Gpt4Turbo);
        assert_eq!(state.draft.job_description, "Rust");
    }

    #[test]
    fn test_original_resume_is_overwritten_wholesale() {
        let state = reduce(AppSnapshot::initial(), Action::SetOriginalResume("old".into()));
        let state = reduce(state, Action::SetOriginalResume("new".into()));
        assert_eq!(state.draft.original_resume, "new");
    }

    #[test]
    fn test_add_generated_version_appends_in_order() {
        let mut state = AppSnapshot::initial();
        for (i, id) in ["100", "101", "102"].iter().enumerate() {
            state = reduce(state, Action::AddGeneratedVersion(version(id)));
            assert_eq!(state.generated_versions.len(), i + 1);
        }
        let ids: Vec<_> = state.generated_versions.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["100", "101", "102"]);
    }

    #[test]
    fn test_clear_state_restores_initial_state() {
        let mut state = AppSnapshot::initial();
        for action in [
            Action::SetApiKey("sk-test".into()),
            Action::SetOriginalResume("resume".into()),
            Action::SetJobDescription("jd".into()),
            Action::SetSelectedModel(Model::Gpt4o),
            Action::AddGeneratedVersion(version("1")),
            Action::SetError(Some("boom".into())),
        ] {
            state = reduce(state, action);
        }
        assert_ne!(state, AppSnapshot::initial());

        let state = reduce(state, Action::ClearState);
        assert_eq!(state, AppSnapshot::initial());
    }

    #[test]
    fn test_clear_state_keeps_busy_flag() {
        let state = reduce(AppSnapshot::initial(), Action::SetOriginalResume("resume".into()));
        let state = reduce(state, Action::SetIsLoading(true));

        let state = reduce(state, Action::ClearState);

        assert!(state.draft.is_loading);
        assert!(state.draft.original_resume.is_empty());
        assert!(state.generated_versions.is_empty());
    }

    #[test]
    fn test_set_error_overwrites_previous_error() {
        let state = reduce(AppSnapshot::initial(), Action::SetError(Some("first".into())));
        let state = reduce(state, Action::SetError(Some("second".into())));
        assert_eq!(state.draft.error.as_deref(), Some("second"));
        let state = reduce(state, Action::SetError(None));
        assert!(state.draft.error.is_none());
    }
}
