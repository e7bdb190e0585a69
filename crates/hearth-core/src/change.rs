//! Document-change payloads and handler results.
//!
//! The upstream document store invokes the sync engine with a before/after
//! snapshot pair per write. A write whose post-state is absent is a
//! tombstone and signals deletion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single document-change notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChange {
    /// Document body before the write (`None` on create).
    pub before: Option<Value>,
    /// Document body after the write (`None` on delete).
    pub after: Option<Value>,
}

impl DocumentChange {
    /// A creation event: no prior state.
    pub fn created(after: Value) -> Self {
        Self {
            before: None,
            after: Some(after),
        }
    }

    /// An update event.
    pub fn updated(before: Value, after: Value) -> Self {
        Self {
            before: Some(before),
            after: Some(after),
        }
    }

    /// A deletion tombstone.
    pub fn deleted(before: Value) -> Self {
        Self {
            before: Some(before),
            after: None,
        }
    }

    /// Whether this change deletes the document.
    pub fn is_delete(&self) -> bool {
        self.after.is_none()
    }

    /// Current document state, if any.
    pub fn data(&self) -> Option<&Value> {
        self.after.as_ref()
    }
}

/// Result returned by every public change handler.
///
/// Handlers never propagate errors to the caller; failures are folded into
/// `success: false` so a graph outage can never block the upstream write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncOutcome {
    /// Successful sync with the action that was taken.
    pub fn ok(action: &str) -> Self {
        Self {
            success: true,
            action: Some(action.to_string()),
            error: None,
        }
    }

    /// Failed sync carrying the error message.
    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            action: None,
            error: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tombstone_detection() {
        let change = DocumentChange::deleted(json!({"title": "Dentist"}));
        assert!(change.is_delete());
        assert!(change.data().is_none());

        let change = DocumentChange::created(json!({"title": "Dentist"}));
        assert!(!change.is_delete());
        assert!(change.data().is_some());
    }

    #[test]
    fn test_outcome_shapes() {
        let ok = SyncOutcome::ok("synced");
        assert!(ok.success);
        assert_eq!(ok.action.as_deref(), Some("synced"));
        assert!(ok.error.is_none());

        let failed = SyncOutcome::failed("connection refused");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("connection refused"));
    }
}
