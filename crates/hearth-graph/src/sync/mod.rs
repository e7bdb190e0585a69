//! Document-change to Neo4j synchronization pipeline.
//!
//! One module per upstream collection. Each mapper turns the decoded
//! document into idempotent MERGE statements issued through the write
//! executor; the handlers on [`SyncService`] wrap the mappers in the
//! never-throw boundary contract the upstream change dispatcher relies on.

pub mod chore;
pub mod event;
pub mod fair_play;
pub mod family;
pub mod survey;
pub mod task;

use neo4rs::Query;
use serde::de::DeserializeOwned;
use tracing::{error, info};

use hearth_core::chore::ChoreDoc;
use hearth_core::event::EventDoc;
use hearth_core::fair_play::FairPlayResponseDoc;
use hearth_core::family::FamilyDoc;
use hearth_core::survey::SurveyDoc;
use hearth_core::task::TaskDoc;
use hearth_core::{HearthError, HearthResult};

use crate::GraphClient;

pub use hearth_core::change::{DocumentChange, SyncOutcome};

/// The sync engine: owns the graph client and exposes one entry point per
/// upstream collection.
///
/// Constructed once at process start and threaded by reference into each
/// change handler registration; there is no global instance. Handler
/// invocations run concurrently and independently. The graph's merge-by-key
/// writes make that safe for node upserts, while the additive counter
/// updates knowingly assume at-most-once delivery (see the chore and
/// fair-play modules).
pub struct SyncService {
    client: GraphClient,
}

impl SyncService {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GraphClient {
        &self.client
    }

    /// Handle a write to a family document.
    pub async fn on_family_write(&self, family_id: &str, change: &DocumentChange) -> SyncOutcome {
        let result = match decode::<FamilyDoc>(change, "families", family_id) {
            Ok(None) => self.delete_family(family_id).await,
            Ok(Some(doc)) => family::sync_family(&self.client, family_id, &doc).await,
            Err(err) => Err(err),
        };
        finish("families", family_id, result)
    }

    /// Handle a write to a task document.
    pub async fn on_task_write(&self, task_id: &str, change: &DocumentChange) -> SyncOutcome {
        let result = match decode::<TaskDoc>(change, "tasks", task_id) {
            Ok(None) => self.delete_keyed(task_id, "Task", "taskId").await,
            Ok(Some(doc)) => task::sync_task(&self.client, task_id, &doc).await,
            Err(err) => Err(err),
        };
        finish("tasks", task_id, result)
    }

    /// Handle a write to an event document.
    pub async fn on_event_write(&self, event_id: &str, change: &DocumentChange) -> SyncOutcome {
        let result = match decode::<EventDoc>(change, "events", event_id) {
            Ok(None) => self.delete_keyed(event_id, "Event", "eventId").await,
            Ok(Some(doc)) => event::sync_event(&self.client, event_id, &doc).await,
            Err(err) => Err(err),
        };
        finish("events", event_id, result)
    }

    /// Handle creation of a chore-completion document.
    pub async fn on_chore_create(&self, chore_id: &str, change: &DocumentChange) -> SyncOutcome {
        let result = match decode::<ChoreDoc>(change, "chores", chore_id) {
            Ok(None) => Ok("skipped"),
            Ok(Some(doc)) => chore::sync_chore_completion(&self.client, chore_id, &doc).await,
            Err(err) => Err(err),
        };
        finish("chores", chore_id, result)
    }

    /// Handle creation of a Fair Play card response.
    pub async fn on_fair_play_response_create(
        &self,
        response_id: &str,
        change: &DocumentChange,
    ) -> SyncOutcome {
        let result = match decode::<FairPlayResponseDoc>(change, "fairPlayResponses", response_id)
        {
            Ok(None) => Ok("skipped"),
            Ok(Some(doc)) => {
                fair_play::sync_fair_play_response(&self.client, response_id, &doc).await
            }
            Err(err) => Err(err),
        };
        finish("fairPlayResponses", response_id, result)
    }

    /// Handle a write to a survey document.
    pub async fn on_survey_write(&self, survey_id: &str, change: &DocumentChange) -> SyncOutcome {
        let result = match decode::<SurveyDoc>(change, "surveys", survey_id) {
            Ok(None) => self.delete_keyed(survey_id, "Survey", "surveyId").await,
            Ok(Some(doc)) => survey::sync_survey(&self.client, survey_id, &doc).await,
            Err(err) => Err(err),
        };
        finish("surveys", survey_id, result)
    }

    /// Detach-delete a node by its natural key (tombstone handling).
    async fn delete_keyed(
        &self,
        id: &str,
        label: &str,
        key: &str,
    ) -> HearthResult<&'static str> {
        let statement = format!("MATCH (n:{label} {{{key}: $id}}) DETACH DELETE n");
        self.client
            .execute_write(Query::new(statement).param("id", id))
            .await?;
        info!(id, label, "Deleted node and its relationships");
        Ok("deleted")
    }

    async fn delete_family(&self, family_id: &str) -> HearthResult<&'static str> {
        self.delete_keyed(family_id, "Family", "familyId").await
    }
}

/// Decode the post-state of a change into a typed document.
///
/// `Ok(None)` is a tombstone. Decode failures surface as document errors so
/// the boundary can report them without panicking.
fn decode<T: DeserializeOwned>(
    change: &DocumentChange,
    collection: &str,
    id: &str,
) -> HearthResult<Option<T>> {
    match change.data() {
        None => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|err| HearthError::DocumentDecode {
                collection: collection.to_string(),
                id: id.to_string(),
                message: err.to_string(),
            }),
    }
}

/// Fold a mapper result into the handler return contract. Nothing escapes
/// this boundary: a graph-sync failure must never block the upstream
/// document write.
fn finish(collection: &str, id: &str, result: HearthResult<&'static str>) -> SyncOutcome {
    match result {
        Ok(action) => SyncOutcome::ok(action),
        Err(err) => {
            error!(collection, id, error = %err, "Sync failed");
            SyncOutcome::failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphConfig;
    use serde_json::json;

    /// A service pointed at a closed port with retries disabled: every
    /// graph write fails fast with connection refused.
    fn unreachable_service() -> SyncService {
        let client = GraphClient::new(GraphConfig {
            uri: "bolt://127.0.0.1:1".to_string(),
            user: "neo4j".to_string(),
            password: "pw".to_string(),
        })
        .with_write_retries(0);
        SyncService::new(client)
    }

    #[tokio::test]
    async fn test_handler_never_propagates_graph_errors() {
        let service = unreachable_service();
        let change = DocumentChange::created(json!({
            "title": "Book dentist",
            "priority": "high",
            "familyId": "rivera"
        }));

        let outcome = service.on_task_write("task-1", &change).await;
        assert!(!outcome.success);
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn test_task_without_family_id_returns_result_object() {
        let service = unreachable_service();
        let change = DocumentChange::created(json!({"title": "Book dentist"}));

        let outcome = service.on_task_write("task-2", &change).await;
        // No familyId is not a decode error; the write still fails against
        // the unreachable graph, but as a result object, never a panic.
        assert!(outcome.error.is_some() || outcome.success);
    }

    #[tokio::test]
    async fn test_malformed_document_reports_decode_error() {
        let service = unreachable_service();
        // familyMembers must be an array
        let change = DocumentChange::created(json!({"familyMembers": "not-a-list"}));

        let outcome = service.on_family_write("rivera", &change).await;
        assert!(!outcome.success);
        let err = outcome.error.unwrap();
        assert!(err.contains("families/rivera"));
    }

    #[tokio::test]
    async fn test_chore_tombstone_is_a_noop() {
        let service = unreachable_service();
        let change = DocumentChange::deleted(json!({"assignedTo": "Leo"}));

        let outcome = service.on_chore_create("chore-1", &change).await;
        assert!(outcome.success);
        assert_eq!(outcome.action.as_deref(), Some("skipped"));
    }
}
