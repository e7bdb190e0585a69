//! Survey synchronization to Neo4j.
//!
//! The widest mapper by statement count. One survey fans out into:
//! - (:Survey)
//! - per member: a (:Person) score update plus
//!   (:Person)-[:COMPLETED]->(:Survey) and (:Survey)-[:MEASURES]->(:Person)
//! - per informative response: (:Question), (:SurveyResponse),
//!   (:Survey)-[:CONTAINS]->(:SurveyResponse)-[:ANSWERS]->(:Question), and
//!   (:Person)-[:MENTIONED_IN]->(:SurveyResponse) when the answer names a
//!   user directly.

use chrono::Utc;
use neo4rs::Query;
use serde_json::Value;
use tracing::{debug, warn};

use hearth_core::load::survey::{answer_encodes_user_id, answer_is_skipped};
use hearth_core::load::{classify_task_type, SurveyBreakdown};
use hearth_core::survey::{question_category, response_id, SurveyDoc};
use hearth_core::time::{coerce_timestamp, format_timestamp};
use hearth_core::HearthResult;

use crate::GraphClient;

/// Sync a survey document: member load scores, the survey node, the
/// per-member relationship pair, and every question/answer pair.
pub async fn sync_survey(
    client: &GraphClient,
    survey_id: &str,
    doc: &SurveyDoc,
) -> HearthResult<&'static str> {
    let family_id = doc.family_id.as_deref().unwrap_or("");
    let breakdown = SurveyBreakdown::from_doc(doc);
    let completed_at = format_timestamp(&coerce_timestamp(doc.completed_at.as_ref()));
    let now = format_timestamp(&Utc::now());

    let overall_imbalance = doc
        .overall_imbalance
        .unwrap_or_else(|| breakdown.overall_imbalance());

    let survey = Query::new(
        "MERGE (s:Survey {surveyId: $surveyId, familyId: $familyId})
         SET s.surveyType = $surveyType,
             s.cycleNumber = $cycleNumber,
             s.completedAt = $completedAt,
             s.overallImbalance = $overallImbalance"
            .to_string(),
    )
    .param("surveyId", survey_id)
    .param("familyId", family_id)
    .param("surveyType", doc.survey_type.as_deref().unwrap_or(""))
    .param("cycleNumber", doc.cycle_number)
    .param("completedAt", completed_at.as_str())
    .param("overallImbalance", overall_imbalance);

    client.execute_write(survey).await?;

    // Per-member score update plus the COMPLETED/MEASURES pair. The survey
    // scores are derived fields; the additive cognitiveLoad accumulator
    // belongs to the chore and fair-play paths and is never set here.
    for (user_id, load) in breakdown.members() {
        let share = breakdown.share(user_id);

        let person = Query::new(
            "MERGE (p:Person {userId: $userId})
             ON CREATE SET p.cognitiveLoad = 0.0,
                           p.choresCompleted = 0
             SET p.familyId = $familyId,
                 p.anticipationScore = $anticipationScore,
                 p.monitoringScore = $monitoringScore,
                 p.executionScore = $executionScore,
                 p.totalLoadScore = $totalLoadScore,
                 p.invisibleLaborScore = $invisibleLaborScore,
                 p.lastUpdated = $lastUpdated"
                .to_string(),
        )
        .param("userId", user_id)
        .param("familyId", family_id)
        .param("anticipationScore", load.anticipation_score())
        .param("monitoringScore", load.monitoring_score())
        .param("executionScore", load.execution_score())
        .param("totalLoadScore", load.total_score())
        .param("invisibleLaborScore", share)
        .param("lastUpdated", now.as_str());

        client.execute_write(person).await?;

        let relationships = Query::new(
            "MATCH (p:Person {userId: $userId})
             MATCH (s:Survey {surveyId: $surveyId, familyId: $familyId})
             MERGE (p)-[c:COMPLETED]->(s)
             SET c.responseCount = $responseCount
             MERGE (s)-[m:MEASURES]->(p)
             SET m.anticipationScore = $anticipationScore,
                 m.monitoringScore = $monitoringScore,
                 m.executionScore = $executionScore,
                 m.totalLoadScore = $totalLoadScore"
                .to_string(),
        )
        .param("userId", user_id)
        .param("surveyId", survey_id)
        .param("familyId", family_id)
        .param("responseCount", i64::from(load.response_count()))
        .param("anticipationScore", load.anticipation_score())
        .param("monitoringScore", load.monitoring_score())
        .param("executionScore", load.execution_score())
        .param("totalLoadScore", load.total_score());

        client.execute_write(relationships).await?;
    }

    // Question/answer fan-out.
    for (question_key, answer) in &doc.responses {
        if answer_is_skipped(answer) {
            continue;
        }

        sync_response(client, survey_id, family_id, doc, question_key, answer, &now).await?;
    }

    debug!(
        survey_id,
        family_id,
        members = breakdown.members().count(),
        responses = doc.responses.len(),
        "Synced survey"
    );
    Ok("synced")
}

async fn sync_response(
    client: &GraphClient,
    survey_id: &str,
    family_id: &str,
    doc: &SurveyDoc,
    question_key: &str,
    answer: &Value,
    timestamp: &str,
) -> HearthResult<()> {
    let question = match doc.question_text(question_key) {
        Some(text) => format!("{text} {question_key}"),
        None => question_key.to_string(),
    };
    let task_type = classify_task_type(&question);
    let category = question_category(question_key);
    let response_key = response_id(survey_id, question_key);

    let question_node = Query::new(
        "MERGE (q:Question {questionKey: $questionKey, familyId: $familyId})
         SET q.category = $category,
             q.taskType = $taskType"
            .to_string(),
    )
    .param("questionKey", question_key)
    .param("familyId", family_id)
    .param("category", category)
    .param("taskType", task_type.as_str());

    client.execute_write(question_node).await?;

    // Answers are stored as text; raw id arrays keep their JSON form.
    let answer_text = match answer {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let response_node = Query::new(
        "MATCH (s:Survey {surveyId: $surveyId, familyId: $familyId})
         MATCH (q:Question {questionKey: $questionKey, familyId: $familyId})
         MERGE (r:SurveyResponse {responseId: $responseId, familyId: $familyId})
         SET r.answer = $answer,
             r.questionKey = $questionKey,
             r.surveyId = $surveyId,
             r.timestamp = $timestamp
         MERGE (s)-[:CONTAINS]->(r)
         MERGE (r)-[:ANSWERS]->(q)"
            .to_string(),
    )
    .param("surveyId", survey_id)
    .param("familyId", family_id)
    .param("questionKey", question_key)
    .param("responseId", response_key.as_str())
    .param("answer", answer_text.as_str())
    .param("timestamp", timestamp);

    client.execute_write(response_node).await?;

    // Only answers that directly encode a user id get a mention edge;
    // legacy name answers stay anonymous at the response level.
    if let Some(answer_str) = answer.as_str() {
        if answer_encodes_user_id(answer_str, family_id) {
            let mentioned = Query::new(
                "MATCH (p:Person {userId: $userId})
                 MATCH (r:SurveyResponse {responseId: $responseId, familyId: $familyId})
                 MERGE (p)-[:MENTIONED_IN]->(r)
                 RETURN count(p) AS linked"
                    .to_string(),
            )
            .param("userId", answer_str)
            .param("responseId", response_key.as_str())
            .param("familyId", family_id);

            match client.execute_write_counting(mentioned, "linked").await {
                Ok(0) => warn!(
                    survey_id,
                    question_key,
                    user_id = answer_str,
                    "Mentioned person not in graph, skipping MENTIONED_IN edge"
                ),
                Ok(_) => {}
                Err(err) => warn!(
                    survey_id,
                    question_key,
                    user_id = answer_str,
                    error = %err,
                    "Failed to link mentioned person"
                ),
            }
        }
    }

    Ok(())
}
