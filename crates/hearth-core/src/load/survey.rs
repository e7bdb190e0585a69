//! Survey-derived cognitive-load aggregation.
//!
//! Classifies each survey response into an invisible-labor task type,
//! attributes it to the member(s) the answer names, and reduces the counts
//! into weighted per-member scores. Unlike the task heuristic, the final
//! per-member load is a proportion of the family total.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::survey::SurveyDoc;

/// The three invisible-labor task types measured by the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    Anticipation,
    Monitoring,
    Execution,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anticipation => "anticipation",
            Self::Monitoring => "monitoring",
            Self::Execution => "execution",
        }
    }
}

/// Weight applied to anticipation work (planning ahead is the heaviest).
const ANTICIPATION_WEIGHT: f64 = 2.0;
/// Weight applied to monitoring work.
const MONITORING_WEIGHT: f64 = 1.5;
/// Weight applied to execution work.
const EXECUTION_WEIGHT: f64 = 1.0;

const ANTICIPATION_KEYWORDS: &[&str] = &[
    "anticipat", "plan", "ahead", "prepar", "remember", "schedul", "upcoming", "decide",
];

const MONITORING_KEYWORDS: &[&str] = &[
    "monitor", "track", "check", "notice", "watch", "follow", "supervis", "keep",
];

/// Classify a question into a task type by keyword substring match.
///
/// Evaluated as an ordered rule list, first match wins: anticipation
/// keywords before monitoring keywords, with execution as the default arm.
/// The input is the combined question text and key, lowercased here.
pub fn classify_task_type(question: &str) -> TaskType {
    let haystack = question.to_lowercase();

    if ANTICIPATION_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
        TaskType::Anticipation
    } else if MONITORING_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
        TaskType::Monitoring
    } else {
        TaskType::Execution
    }
}

/// Whether a string answer directly encodes a user identifier.
///
/// User ids carry an `_agent` suffix or embed the family id; legacy name
/// answers do not.
pub fn answer_encodes_user_id(answer: &str, family_id: &str) -> bool {
    answer.contains("_agent") || (!family_id.is_empty() && answer.contains(family_id))
}

/// Whether an answer is non-informative and should be skipped outright.
pub fn answer_is_skipped(answer: &Value) -> bool {
    matches!(answer.as_str(), Some("Neither") | Some("Neutral"))
}

/// Resolve the user id(s) an answer attributes work to.
///
/// Handles raw arrays of ids, direct-id strings, and the legacy name
/// literals from early survey cycles (`mama`/`mom`/`mother`,
/// `papa`/`dad`/`father`) which map to synthesized per-family ids. The
/// literal `both` is skipped rather than fanned out to two users; that gap
/// is kept for parity with the upstream scorer.
pub fn resolve_answer_users(answer: &Value, family_id: &str) -> Vec<String> {
    match answer {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) => {
            if s.eq_ignore_ascii_case("both") {
                return Vec::new();
            }
            if answer_encodes_user_id(s, family_id) {
                return vec![s.clone()];
            }
            match s.to_lowercase().as_str() {
                "mama" | "mom" | "mother" => vec![format!("{family_id}_mama")],
                "papa" | "dad" | "father" => vec![format!("{family_id}_papa")],
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

/// Per-member task-type counters accumulated over one survey.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemberLoad {
    pub anticipation: u32,
    pub monitoring: u32,
    pub execution: u32,
}

impl MemberLoad {
    fn record(&mut self, task_type: TaskType) {
        match task_type {
            TaskType::Anticipation => self.anticipation += 1,
            TaskType::Monitoring => self.monitoring += 1,
            TaskType::Execution => self.execution += 1,
        }
    }

    /// Number of responses attributed to this member.
    pub fn response_count(&self) -> u32 {
        self.anticipation + self.monitoring + self.execution
    }

    pub fn anticipation_score(&self) -> f64 {
        f64::from(self.anticipation) * ANTICIPATION_WEIGHT
    }

    pub fn monitoring_score(&self) -> f64 {
        f64::from(self.monitoring) * MONITORING_WEIGHT
    }

    pub fn execution_score(&self) -> f64 {
        f64::from(self.execution) * EXECUTION_WEIGHT
    }

    /// Weighted total across the three task types.
    pub fn total_score(&self) -> f64 {
        self.anticipation_score() + self.monitoring_score() + self.execution_score()
    }
}

/// The per-member load breakdown computed from one survey document.
#[derive(Debug, Clone, Default)]
pub struct SurveyBreakdown {
    members: BTreeMap<String, MemberLoad>,
}

impl SurveyBreakdown {
    /// Aggregate every informative response in the survey.
    pub fn from_doc(doc: &SurveyDoc) -> Self {
        let family_id = doc.family_id.as_deref().unwrap_or("");
        let mut members: BTreeMap<String, MemberLoad> = BTreeMap::new();

        for (question_key, answer) in &doc.responses {
            if answer_is_skipped(answer) {
                continue;
            }

            let question = match doc.question_text(question_key) {
                Some(text) => format!("{text} {question_key}"),
                None => question_key.clone(),
            };
            let task_type = classify_task_type(&question);

            for user_id in resolve_answer_users(answer, family_id) {
                members.entry(user_id).or_default().record(task_type);
            }
        }

        Self { members }
    }

    /// Members with at least one attributed response, with their counters.
    pub fn members(&self) -> impl Iterator<Item = (&str, &MemberLoad)> {
        self.members.iter().map(|(id, load)| (id.as_str(), load))
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of all members' weighted scores.
    pub fn family_total(&self) -> f64 {
        self.members.values().map(MemberLoad::total_score).sum()
    }

    /// A member's share of the family total; shares sum to 1.0 whenever the
    /// total is positive.
    pub fn share(&self, user_id: &str) -> f64 {
        let total = self.family_total();
        if total <= 0.0 {
            return 0.0;
        }
        self.members
            .get(user_id)
            .map(|load| load.total_score() / total)
            .unwrap_or(0.0)
    }

    /// Spread between the heaviest and lightest member's share. Zero with
    /// fewer than two members.
    pub fn overall_imbalance(&self) -> f64 {
        if self.members.len() < 2 {
            return 0.0;
        }
        let shares: Vec<f64> = self.members.keys().map(|id| self.share(id)).collect();
        let max = shares.iter().cloned().fold(f64::MIN, f64::max);
        let min = shares.iter().cloned().fold(f64::MAX, f64::min);
        max - min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn survey(responses: Value) -> SurveyDoc {
        serde_json::from_value(json!({
            "surveyType": "invisible_labor",
            "familyId": "rivera",
            "responses": responses,
        }))
        .unwrap()
    }

    #[test]
    fn test_classification_priority_order() {
        // "plan" (anticipation) wins over "track" (monitoring) when both match
        assert_eq!(
            classify_task_type("who plans and tracks the meals"),
            TaskType::Anticipation
        );
        assert_eq!(
            classify_task_type("school_forms_tracking"),
            TaskType::Monitoring
        );
        assert_eq!(classify_task_type("laundry_who_does"), TaskType::Execution);
    }

    #[test]
    fn test_resolve_direct_id() {
        assert_eq!(
            resolve_answer_users(&json!("rivera_mama"), "rivera"),
            vec!["rivera_mama".to_string()]
        );
        assert_eq!(
            resolve_answer_users(&json!("helper_agent"), "rivera"),
            vec!["helper_agent".to_string()]
        );
    }

    #[test]
    fn test_resolve_array_of_ids() {
        assert_eq!(
            resolve_answer_users(&json!(["a", "b"]), "rivera"),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_both_is_skipped() {
        assert!(resolve_answer_users(&json!("Both"), "rivera").is_empty());
        assert!(resolve_answer_users(&json!("both"), "rivera").is_empty());
    }

    #[test]
    fn test_legacy_names_synthesize_ids() {
        assert_eq!(
            resolve_answer_users(&json!("Mama"), "fam42"),
            vec!["fam42_mama".to_string()]
        );
        assert_eq!(
            resolve_answer_users(&json!("dad"), "fam42"),
            vec!["fam42_papa".to_string()]
        );
    }

    #[test]
    fn test_unattributable_answer_resolves_to_nobody() {
        assert!(resolve_answer_users(&json!("the neighbor"), "rivera").is_empty());
        assert!(resolve_answer_users(&json!(42), "rivera").is_empty());
    }

    #[test]
    fn test_neither_and_neutral_skipped() {
        let doc = survey(json!({
            "meals_who_plans": "Neither",
            "laundry_who_does": "Neutral",
        }));
        let breakdown = SurveyBreakdown::from_doc(&doc);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn test_shares_sum_to_one() {
        let doc = survey(json!({
            "meals_who_plans": "rivera_mama",
            "school_forms_tracking": "rivera_mama",
            "laundry_who_does": "rivera_papa",
            "appointments_scheduling": "rivera_mama",
        }));
        let breakdown = SurveyBreakdown::from_doc(&doc);
        let sum: f64 = breakdown
            .members()
            .map(|(id, _)| breakdown.share(id))
            .sum::<f64>();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_scores() {
        let doc = survey(json!({
            "meals_who_plans": "rivera_mama",        // anticipation: 2.0
            "school_forms_tracking": "rivera_mama",  // monitoring: 1.5
            "laundry_who_does": "rivera_mama",       // execution: 1.0
        }));
        let breakdown = SurveyBreakdown::from_doc(&doc);
        let (_, load) = breakdown.members().next().unwrap();
        assert_eq!(load.response_count(), 3);
        assert!((load.total_score() - 4.5).abs() < 1e-9);
        assert!((breakdown.share("rivera_mama") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_imbalance_spread() {
        let doc = survey(json!({
            "meals_who_plans": "rivera_mama",   // 2.0
            "laundry_who_does": "rivera_papa",  // 1.0
        }));
        let breakdown = SurveyBreakdown::from_doc(&doc);
        // shares: mama 2/3, papa 1/3 -> spread 1/3
        assert!((breakdown.overall_imbalance() - (1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_survey_has_zero_total() {
        let doc = survey(json!({}));
        let breakdown = SurveyBreakdown::from_doc(&doc);
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.family_total(), 0.0);
        assert_eq!(breakdown.overall_imbalance(), 0.0);
    }
}
