use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The chat models a user can pick for tailoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Gpt4oMini, Model::Gpt4o, Model::Gpt4Turbo];

    /// Identifier sent to the completions endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4Turbo => "gpt-4-turbo",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown model '{0}'. Choose one of: gpt-4o-mini, gpt-4o, gpt-4-turbo")]
pub struct UnknownModel(pub String);

impl FromStr for Model {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}
