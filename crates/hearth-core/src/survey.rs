//! Invisible-labor survey document model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A survey document as stored upstream.
///
/// `responses` maps a question key (e.g. `meals_who_plans`) to an answer
/// value: usually a string, occasionally a raw array of user ids.
/// `questionTexts` carries the human-readable prompt per key when the client
/// recorded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDoc {
    #[serde(default)]
    pub survey_type: Option<String>,
    #[serde(default)]
    pub cycle_number: Option<i64>,
    #[serde(default)]
    pub family_id: Option<String>,
    #[serde(default)]
    pub completed_at: Option<Value>,
    #[serde(default)]
    pub overall_imbalance: Option<f64>,
    #[serde(default)]
    pub responses: BTreeMap<String, Value>,
    #[serde(default)]
    pub question_texts: BTreeMap<String, String>,
}

impl SurveyDoc {
    /// Human-readable text for a question key, when the client recorded it.
    pub fn question_text(&self, key: &str) -> Option<&str> {
        self.question_texts.get(key).map(String::as_str)
    }
}

/// Category a question belongs to: the key prefix before the first
/// underscore (`meals_who_plans` -> `meals`). Keys without an underscore are
/// their own category.
pub fn question_category(question_key: &str) -> &str {
    question_key
        .split_once('_')
        .map(|(prefix, _)| prefix)
        .unwrap_or(question_key)
}

/// Deterministic id for a response node within a survey.
pub fn response_id(survey_id: &str, question_key: &str) -> String {
    format!("{survey_id}_{question_key}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_category_prefix() {
        assert_eq!(question_category("meals_who_plans"), "meals");
        assert_eq!(question_category("school_forms_tracking"), "school");
        assert_eq!(question_category("overall"), "overall");
    }

    #[test]
    fn test_response_id_shape() {
        assert_eq!(
            response_id("cycle3_rivera", "meals_who_plans"),
            "cycle3_rivera_meals_who_plans"
        );
    }

    #[test]
    fn test_decode_mixed_answers() {
        let doc: SurveyDoc = serde_json::from_value(json!({
            "surveyType": "invisible_labor",
            "cycleNumber": 3,
            "familyId": "rivera",
            "responses": {
                "meals_who_plans": "rivera_mama",
                "school_forms_tracking": ["rivera_mama", "rivera_papa"]
            }
        }))
        .unwrap();
        assert_eq!(doc.responses.len(), 2);
        assert!(doc.responses["school_forms_tracking"].is_array());
    }
}
