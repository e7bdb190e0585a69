//! Event document model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A calendar-event document as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDoc {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_time: Option<Value>,
    #[serde(default)]
    pub end_time: Option<Value>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub family_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role_assignments: Vec<RoleAssignment>,
}

impl EventDoc {
    /// The organizing user, when known.
    pub fn organizer(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != "unknown")
    }
}

/// One member's role assignments for an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub user_id: String,
    #[serde(default)]
    pub specific_roles: Vec<String>,
    #[serde(default)]
    pub assigned_by: Option<String>,
    #[serde(default)]
    pub auto_assigned: Option<bool>,
    #[serde(default)]
    pub confirmed: Option<bool>,
}

impl RoleAssignment {
    /// Confirmation defaults to true unless explicitly false.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed != Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confirmed_defaults_true() {
        let ra: RoleAssignment = serde_json::from_value(json!({
            "userId": "rivera_papa",
            "specificRoles": ["meal_planner"]
        }))
        .unwrap();
        assert!(ra.is_confirmed());

        let ra: RoleAssignment = serde_json::from_value(json!({
            "userId": "rivera_papa",
            "specificRoles": [],
            "confirmed": false
        }))
        .unwrap();
        assert!(!ra.is_confirmed());
    }

    #[test]
    fn test_organizer_unknown_is_nobody() {
        let doc: EventDoc = serde_json::from_value(json!({
            "title": "Soccer practice",
            "userId": "unknown"
        }))
        .unwrap();
        assert_eq!(doc.organizer(), None);
    }
}
