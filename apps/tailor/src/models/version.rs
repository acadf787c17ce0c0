use serde::{Deserialize, Serialize};

/// One immutable result of a successful tailoring request.
///
/// `id` is the decimal creation time in epoch milliseconds, bumped past the
/// previous id when two versions land in the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVersion {
    pub id: String,
    pub tailored_resume: String,
    pub explanation: String,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl GeneratedVersion {
    /// Chip label: "Version " followed by the last four characters of the id.
    pub fn label(&self) -> String {
        let chars: Vec<char> = self.id.chars().collect();
        let start = chars.len().saturating_sub(4);
        format!("Version {}", chars[start..].iter().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(id: &str) -> GeneratedVersion {
        GeneratedVersion {
            id: id.to_string(),
            tailored_resume: String::new(),
            explanation: String::new(),
            created_at: 0,
        }
    }

    #[test]
    fn test_label_uses_last_four_chars() {
        assert_eq!(version("1718000001234").label(), "Version 1234");
    }

    #[test]
    fn test_label_with_short_id() {
        assert_eq!(version("42").label(), "Version 42");
    }
}
