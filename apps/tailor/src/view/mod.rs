//! View Layer state: the transient selected-version pointer and the
//! read-models the HTTP surface renders.

pub mod diff;
pub mod handlers;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::errors::AppError;
use crate::models::GeneratedVersion;

pub use diff::{side_by_side_diff, DiffRow};

pub type SharedView = Arc<Mutex<ViewState>>;

pub fn lock_view(view: &SharedView) -> MutexGuard<'_, ViewState> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Which version is on screen. Never persisted.
#[derive(Debug, Default)]
pub struct ViewState {
    selected: Option<String>,
    seen: usize,
}

impl ViewState {
    /// Follows the collection: when it grows, or the selection no longer
    /// exists, the newest version becomes selected.
    pub fn sync(&mut self, versions: &[GeneratedVersion]) {
        let grew = versions.len() > self.seen;
        let dangling = self
            .selected
            .as_deref()
            .is_some_and(|id| !versions.iter().any(|v| v.id == id));

        if grew || dangling || (self.selected.is_none() && !versions.is_empty()) {
            self.selected = versions.last().map(|v| v.id.clone());
        }
        self.seen = versions.len();
    }

    pub fn select(&mut self, versions: &[GeneratedVersion], id: &str) -> Result<(), AppError> {
        self.sync(versions);
        if !versions.iter().any(|v| v.id == id) {
            return Err(AppError::NotFound(format!("Version {id} not found")));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

/// A selectable entry in the version list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionChip {
    pub id: String,
    pub label: String,
    pub created_at: i64,
    pub selected: bool,
}

pub fn version_chips(versions: &[GeneratedVersion], selected: Option<&str>) -> Vec<VersionChip> {
    versions
        .iter()
        .map(|v| VersionChip {
            id: v.id.clone(),
            label: v.label(),
            created_at: v.created_at,
            selected: selected == Some(v.id.as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(ids: &[&str]) -> Vec<GeneratedVersion> {
        ids.iter()
            .map(|id| GeneratedVersion {
                id: id.to_string(),
                tailored_resume: format!("resume {id}"),
                explanation: String::new(),
                created_at: 0,
            })
            .collect()
    }

    #[test]
    fn test_sync_on_load_selects_latest() {
        let mut view = ViewState::default();
        view.sync(&versions(&["1", "2"]));
        assert_eq!(view.selected(), Some("2"));
    }

    #[test]
    fn test_append_moves_selection_to_new_version() {
        let mut view = ViewState::default();
        let mut list = versions(&["1000", "1001"]);
        view.sync(&list);
        view.select(&list, "1000").unwrap();
        assert_eq!(view.selected(), Some("1000"));

        list.extend(versions(&["1002"]));
        view.sync(&list);
        assert_eq!(view.selected(), Some("1002"));
    }

    #[test]
    fn test_manual_selection_survives_resync_without_growth() {
        let mut view = ViewState::default();
        let list = versions(&["1", "2", "3"]);
        view.sync(&list);
        view.select(&list, "1").unwrap();
        view.sync(&list);
        assert_eq!(view.selected(), Some("1"));
    }

    #[test]
    fn test_reset_clears_selection() {
        let mut view = ViewState::default();
        view.sync(&versions(&["1"]));
        view.sync(&[]);
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn test_dangling_selection_after_reset_and_regeneration() {
        let mut view = ViewState::default();
        view.sync(&versions(&["1", "2"]));
        // Reset followed by two generations before the view looked again.
        view.sync(&versions(&["7", "8"]));
        assert_eq!(view.selected(), Some("8"));
    }

    #[test]
    fn test_select_unknown_id_is_not_found() {
        let mut view = ViewState::default();
        let list = versions(&["1"]);
        assert!(matches!(view.select(&list, "9"), Err(AppError::NotFound(_))));
        assert_eq!(view.selected(), Some("1"));
    }

    #[test]
    fn test_chips_mark_selected_and_use_suffix_labels() {
        let list = versions(&["1718000001234", "1718000005678"]);
        let chips = version_chips(&list, Some("1718000005678"));
        assert_eq!(chips[0].label, "Version 1234");
        assert!(!chips[0].selected);
        assert!(chips[1].selected);
    }
}
