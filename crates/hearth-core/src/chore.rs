//! Chore-completion document model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cognitive-load added to each parent when a child completes a chore.
/// The parent carries the monitoring burden even when the child executes.
pub const CHORE_PARENT_LOAD: f64 = 0.02;

/// A chore-completion document as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreDoc {
    /// Display name of the child the chore was assigned to.
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub family_id: Option<String>,
    #[serde(default)]
    pub chore_name: Option<String>,
    #[serde(default)]
    pub completed_at: Option<Value>,
}
