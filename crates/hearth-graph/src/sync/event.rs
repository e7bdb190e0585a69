//! Event synchronization to Neo4j.
//!
//! Creates nodes and relationships:
//! - (:Event)
//! - (:Person)-[:ORGANIZES]->(:Event)
//! - (:Person)-[:PERFORMED_ROLE]->(:Event), one per assigned role name

use neo4rs::Query;
use tracing::{debug, warn};

use hearth_core::event::EventDoc;
use hearth_core::roles::{role_category, role_weight};
use hearth_core::time::{coerce_timestamp, format_timestamp};
use hearth_core::HearthResult;

use crate::GraphClient;

/// Sync an event document, the organizer edge, and every role assignment.
pub async fn sync_event(
    client: &GraphClient,
    event_id: &str,
    doc: &EventDoc,
) -> HearthResult<&'static str> {
    let start_time = format_timestamp(&coerce_timestamp(doc.start_time.as_ref()));
    let end_time = doc
        .end_time
        .as_ref()
        .map(|value| format_timestamp(&coerce_timestamp(Some(value))));

    let event = Query::new(
        "MERGE (e:Event {eventId: $eventId})
         SET e.title = $title,
             e.startTime = $startTime,
             e.endTime = $endTime,
             e.source = $source,
             e.familyId = $familyId"
            .to_string(),
    )
    .param("eventId", event_id)
    .param("title", doc.title.as_deref().unwrap_or(""))
    .param("startTime", start_time.as_str())
    .param("endTime", end_time)
    .param("source", doc.source.as_deref().unwrap_or(""))
    .param("familyId", doc.family_id.clone());

    client.execute_write(event).await?;

    if let Some(user_id) = doc.organizer() {
        let organizes = Query::new(
            "MATCH (p:Person {userId: $userId})
             MATCH (e:Event {eventId: $eventId})
             MERGE (p)-[:ORGANIZES]->(e)
             RETURN count(p) AS linked"
                .to_string(),
        )
        .param("userId", user_id)
        .param("eventId", event_id);

        match client.execute_write_counting(organizes, "linked").await {
            Ok(0) => warn!(event_id, user_id, "Organizer not in graph, skipping ORGANIZES edge"),
            Ok(_) => {}
            Err(err) => {
                warn!(event_id, user_id, error = %err, "Failed to link event organizer")
            }
        }
    }

    // One PERFORMED_ROLE edge per (member, role name), annotated with the
    // static weight/category tables. A failed role never aborts the rest.
    for assignment in &doc.role_assignments {
        for role_name in &assignment.specific_roles {
            let performed = Query::new(
                "MATCH (p:Person {userId: $userId})
                 MATCH (e:Event {eventId: $eventId})
                 MERGE (p)-[r:PERFORMED_ROLE {roleName: $roleName, eventId: $eventId}]->(e)
                 SET r.cognitiveLoadWeight = $weight,
                     r.category = $category,
                     r.assignedBy = $assignedBy,
                     r.autoAssigned = $autoAssigned,
                     r.confirmed = $confirmed
                 RETURN count(p) AS linked"
                    .to_string(),
            )
            .param("userId", assignment.user_id.as_str())
            .param("eventId", event_id)
            .param("roleName", role_name.as_str())
            .param("weight", role_weight(role_name))
            .param("category", role_category(role_name))
            .param("assignedBy", assignment.assigned_by.as_deref().unwrap_or(""))
            .param("autoAssigned", assignment.auto_assigned.unwrap_or(false))
            .param("confirmed", assignment.is_confirmed());

            match client.execute_write_counting(performed, "linked").await {
                Ok(0) => warn!(
                    event_id,
                    user_id = %assignment.user_id,
                    role_name = %role_name,
                    "Role performer not in graph, skipping PERFORMED_ROLE edge"
                ),
                Ok(_) => {}
                Err(err) => warn!(
                    event_id,
                    user_id = %assignment.user_id,
                    role_name = %role_name,
                    error = %err,
                    "Failed to record performed role"
                ),
            }
        }
    }

    debug!(event_id, roles = doc.role_assignments.len(), "Synced event");
    Ok("synced")
}
