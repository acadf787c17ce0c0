use serde::{Deserialize, Serialize};

use crate::models::{GeneratedVersion, Model};

/// The editable input state plus the transient status flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub original_resume: String,
    pub job_description: String,
    pub api_key: String,
    pub selected_model: Model,
    /// Busy flag: set while an extraction or generation call is outstanding.
    pub is_loading: bool,
    /// Last-error slot. A new error overwrites the previous one.
    pub error: Option<String>,
}

/// Everything that is written to durable storage on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSnapshot {
    pub draft: Draft,
    /// Append-only, insertion order is creation order.
    pub generated_versions: Vec<GeneratedVersion>,
}

impl AppSnapshot {
    /// The fixed state restored by a reset.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn find_version(&self, id: &str) -> Option<&GeneratedVersion> {
        self.generated_versions.iter().find(|v| v.id == id)
    }
}
