//! Family synchronization to Neo4j.
//!
//! Creates nodes and relationships:
//! - (:Person)-[:MEMBER_OF]->(:Family)
//! - (:Person)-[:PARENT_OF]->(:Person)

use chrono::Utc;
use neo4rs::Query;
use tracing::debug;

use hearth_core::family::{parent_child_pairs, FamilyDoc};
use hearth_core::time::format_timestamp;
use hearth_core::HearthResult;

use crate::GraphClient;

/// Sync a family document: every member, the family node, membership edges,
/// and the full parents x children cross-product.
///
/// Three separate statements per member, then one statement per parent/child
/// pair. There is no atomicity across the sequence; a mid-sequence failure
/// leaves a partial graph that re-running the same write completes.
pub async fn sync_family(
    client: &GraphClient,
    family_id: &str,
    doc: &FamilyDoc,
) -> HearthResult<&'static str> {
    let family_name = doc.name.as_deref().unwrap_or(family_id);
    let updated_at = format_timestamp(&Utc::now());

    for member in &doc.family_members {
        // MERGE the Person. ON CREATE zero-initializes the additive
        // accumulators so a re-sync never resets them.
        let person = Query::new(
            "MERGE (p:Person {userId: $userId})
             ON CREATE SET p.cognitiveLoad = 0.0,
                           p.choresCompleted = 0
             SET p.name = $name,
                 p.role = $role,
                 p.isParent = $isParent,
                 p.age = $age,
                 p.familyId = $familyId,
                 p.updatedAt = $updatedAt"
                .to_string(),
        )
        .param("userId", member.user_id.as_str())
        .param("name", member.name.as_deref().unwrap_or(""))
        .param("role", member.role_or_default())
        .param("isParent", member.is_parent())
        .param("age", member.age)
        .param("familyId", family_id)
        .param("updatedAt", updated_at.as_str());

        client.execute_write(person).await?;

        // MERGE the Family node
        let family = Query::new(
            "MERGE (f:Family {familyId: $familyId})
             SET f.name = $name"
                .to_string(),
        )
        .param("familyId", family_id)
        .param("name", family_name);

        client.execute_write(family).await?;

        // MEMBER_OF edge
        let member_of = Query::new(
            "MATCH (p:Person {userId: $userId}), (f:Family {familyId: $familyId})
             MERGE (p)-[:MEMBER_OF]->(f)"
                .to_string(),
        )
        .param("userId", member.user_id.as_str())
        .param("familyId", family_id);

        client.execute_write(member_of).await?;

        debug!(user_id = %member.user_id, family_id, "Synced family member");
    }

    // PARENT_OF cross-product, recomputed in full on every family write.
    for (parent_id, child_id) in parent_child_pairs(&doc.family_members) {
        let parent_of = Query::new(
            "MATCH (parent:Person {userId: $parentId}), (child:Person {userId: $childId})
             MERGE (parent)-[:PARENT_OF]->(child)"
                .to_string(),
        )
        .param("parentId", parent_id)
        .param("childId", child_id);

        client.execute_write(parent_of).await?;
    }

    debug!(
        family_id,
        members = doc.family_members.len(),
        "Synced family"
    );
    Ok("synced")
}
