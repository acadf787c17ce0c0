//! Parsing of the structured tailoring reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generation::GenerationError;
use crate::llm_client::strip_json_fences;

/// The two Markdown fields a tailoring reply must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailoredReply {
    #[serde(rename = "tailoredResume")]
    pub tailored_resume: String,
    pub explanation: String,
}

/// Parses the reply text into a [`TailoredReply`].
///
/// Unparseable or empty text is `MalformedReply`/`EmptyReply`; parseable JSON
/// lacking either non-empty string field is `InvalidStructure`.
pub fn parse_reply(text: &str) -> Result<TailoredReply, GenerationError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(GenerationError::EmptyReply);
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| GenerationError::MalformedReply(e.to_string()))?;

    let field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    match (field("tailoredResume"), field("explanation")) {
        (Some(tailored_resume), Some(explanation)) => Ok(TailoredReply {
            tailored_resume,
            explanation,
        }),
        _ => Err(GenerationError::InvalidStructure),
    }
}
