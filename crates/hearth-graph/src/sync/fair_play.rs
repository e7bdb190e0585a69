//! Fair Play card-response synchronization to Neo4j.
//!
//! Creates nodes and relationships:
//! - (:Responsibility), merged on cardName
//! - (:Person)-[:OWNS]->(:Responsibility)

use neo4rs::Query;
use tracing::{debug, warn};

use hearth_core::fair_play::{FairPlayResponseDoc, RESPONSIBILITY_LOAD};
use hearth_core::{HearthError, HearthResult};

use crate::GraphClient;

/// Sync one card response: upsert the Responsibility, link the owner, and
/// add the fixed ownership load to them in the same statement.
///
/// The edge is a MERGE, so repeat syncs keep a single OWNS edge per
/// (person, card) pair; the load increment has no dedup token and assumes
/// at-most-once delivery.
pub async fn sync_fair_play_response(
    client: &GraphClient,
    response_id: &str,
    doc: &FairPlayResponseDoc,
) -> HearthResult<&'static str> {
    let card_name = doc
        .card_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| HearthError::validation("fair play response has no cardName"))?;
    let user_id = doc.user_id.as_deref().unwrap_or("");

    let statement = Query::new(
        "MERGE (r:Responsibility {cardName: $cardName})
         SET r.category = $category,
             r.minimumStandard = $minimumStandard,
             r.familyId = $familyId
         WITH r
         MATCH (p:Person {userId: $userId})
         MERGE (p)-[:OWNS]->(r)
         SET p.cognitiveLoad = coalesce(p.cognitiveLoad, 0.0) + $ownerLoad
         RETURN count(p) AS matched"
            .to_string(),
    )
    .param("cardName", card_name)
    .param("category", doc.category.as_deref().unwrap_or(""))
    .param("minimumStandard", doc.minimum_standard.as_deref().unwrap_or(""))
    .param("familyId", doc.family_id.as_deref().unwrap_or(""))
    .param("userId", user_id)
    .param("ownerLoad", RESPONSIBILITY_LOAD);

    let matched = client.execute_write_counting(statement, "matched").await?;
    if matched == 0 {
        warn!(response_id, user_id, card_name, "Card owner not in graph, skipping OWNS edge");
        return Ok("skipped");
    }

    debug!(response_id, user_id, card_name, "Synced fair play response");
    Ok("synced")
}
