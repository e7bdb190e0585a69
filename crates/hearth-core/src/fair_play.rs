//! Fair Play responsibility-card response model.

use serde::{Deserialize, Serialize};

/// Cognitive-load added to a person for each responsibility card they own.
pub const RESPONSIBILITY_LOAD: f64 = 0.05;

/// A Fair Play card response as stored upstream.
///
/// Responsibility nodes merge on `cardName` alone; `familyId` is written as
/// a plain property. Identical card names in different families share a node
/// (matching upstream behavior).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FairPlayResponseDoc {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub card_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub minimum_standard: Option<String>,
    #[serde(default)]
    pub family_id: Option<String>,
}
