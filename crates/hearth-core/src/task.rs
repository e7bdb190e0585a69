//! Task document model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A task document as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDoc {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub family_id: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub completed_at: Option<Value>,
}

impl TaskDoc {
    /// The person the task should be attributed to: `assignee` with a
    /// `userId` fallback. The literal `unknown` means nobody.
    pub fn attributed_user(&self) -> Option<&str> {
        let candidate = self
            .assignee
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.user_id.as_deref().filter(|s| !s.is_empty()))?;
        (candidate != "unknown").then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attributed_user_fallback_chain() {
        let doc: TaskDoc = serde_json::from_value(json!({
            "title": "Book dentist",
            "userId": "rivera_mama"
        }))
        .unwrap();
        assert_eq!(doc.attributed_user(), Some("rivera_mama"));

        let doc: TaskDoc = serde_json::from_value(json!({
            "title": "Book dentist",
            "assignee": "rivera_papa",
            "userId": "rivera_mama"
        }))
        .unwrap();
        assert_eq!(doc.attributed_user(), Some("rivera_papa"));
    }

    #[test]
    fn test_unknown_user_is_nobody() {
        let doc: TaskDoc = serde_json::from_value(json!({
            "title": "Book dentist",
            "assignee": "unknown"
        }))
        .unwrap();
        assert_eq!(doc.attributed_user(), None);
    }
}
