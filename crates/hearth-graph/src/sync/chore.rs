//! Chore-completion synchronization to Neo4j.

use neo4rs::Query;
use tracing::{debug, warn};

use hearth_core::chore::{ChoreDoc, CHORE_PARENT_LOAD};
use hearth_core::{HearthError, HearthResult};

use crate::GraphClient;

/// Record a completed chore: bump the child's counter and add the fixed
/// monitoring load to every parent.
///
/// A single multi-clause statement. The increments are plain additions with
/// no deduplication token, so redelivery of the same completion double
/// counts; the upstream dispatcher is assumed to deliver at most once.
pub async fn sync_chore_completion(
    client: &GraphClient,
    chore_id: &str,
    doc: &ChoreDoc,
) -> HearthResult<&'static str> {
    let assigned_to = doc
        .assigned_to
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| HearthError::validation("chore document has no assignedTo"))?;
    let family_id = doc.family_id.as_deref().unwrap_or("");

    let statement = Query::new(
        "MATCH (child:Person {name: $assignedTo, familyId: $familyId})
         SET child.choresCompleted = coalesce(child.choresCompleted, 0) + 1
         WITH child
         OPTIONAL MATCH (parent:Person)-[:PARENT_OF]->(child)
         FOREACH (p IN CASE WHEN parent IS NULL THEN [] ELSE [parent] END |
             SET p.cognitiveLoad = coalesce(p.cognitiveLoad, 0.0) + $parentLoad)
         RETURN count(DISTINCT child) AS matched"
            .to_string(),
    )
    .param("assignedTo", assigned_to)
    .param("familyId", family_id)
    .param("parentLoad", CHORE_PARENT_LOAD);

    let matched = client.execute_write_counting(statement, "matched").await?;
    if matched == 0 {
        // The person may simply not be synced yet; skip rather than fail.
        warn!(chore_id, assigned_to, family_id, "Chore target not in graph, skipping");
        return Ok("skipped");
    }

    debug!(chore_id, assigned_to, "Recorded chore completion");
    Ok("synced")
}
