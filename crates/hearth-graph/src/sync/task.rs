//! Task synchronization to Neo4j.
//!
//! Creates nodes and relationships:
//! - (:Task) with its derived cognitiveLoad score
//! - (:Person)-[:CREATED]->(:Task)

use neo4rs::Query;
use tracing::{debug, warn};

use hearth_core::load::calculate_task_cognitive_load;
use hearth_core::task::TaskDoc;
use hearth_core::time::{coerce_timestamp, format_timestamp};
use hearth_core::HearthResult;

use crate::GraphClient;

/// Sync a task document and, when the task names a known person, the
/// attribution edge.
pub async fn sync_task(
    client: &GraphClient,
    task_id: &str,
    doc: &TaskDoc,
) -> HearthResult<&'static str> {
    let cognitive_load = calculate_task_cognitive_load(
        doc.priority.as_deref(),
        doc.category.as_deref(),
        doc.description.as_deref(),
    );

    let created_at = format_timestamp(&coerce_timestamp(doc.created_at.as_ref()));
    let completed_at = doc
        .completed_at
        .as_ref()
        .map(|value| format_timestamp(&coerce_timestamp(Some(value))));

    let task = Query::new(
        "MERGE (t:Task {taskId: $taskId})
         SET t.title = $title,
             t.description = $description,
             t.category = $category,
             t.priority = $priority,
             t.status = $status,
             t.familyId = $familyId,
             t.cognitiveLoad = $cognitiveLoad,
             t.createdAt = $createdAt,
             t.completedAt = $completedAt"
            .to_string(),
    )
    .param("taskId", task_id)
    .param("title", doc.title.as_deref().unwrap_or(""))
    .param("description", doc.description.as_deref().unwrap_or(""))
    .param("category", doc.category.as_deref().unwrap_or(""))
    .param("priority", doc.priority.as_deref().unwrap_or(""))
    .param("status", doc.status.as_deref().unwrap_or(""))
    .param("familyId", doc.family_id.clone())
    .param("cognitiveLoad", cognitive_load)
    .param("createdAt", created_at.as_str())
    .param("completedAt", completed_at);

    client.execute_write(task).await?;

    // Attribution edge. The person may not be synced yet; that only costs
    // the edge, never the task.
    if let Some(user_id) = doc.attributed_user() {
        let created = Query::new(
            "MATCH (p:Person {userId: $userId})
             MATCH (t:Task {taskId: $taskId})
             MERGE (p)-[:CREATED]->(t)
             RETURN count(p) AS linked"
                .to_string(),
        )
        .param("userId", user_id)
        .param("taskId", task_id);

        match client.execute_write_counting(created, "linked").await {
            Ok(0) => warn!(task_id, user_id, "Task creator not in graph, skipping CREATED edge"),
            Ok(_) => {}
            Err(err) => {
                warn!(task_id, user_id, error = %err, "Failed to link task creator")
            }
        }
    }

    debug!(task_id, cognitive_load, "Synced task");
    Ok("synced")
}
