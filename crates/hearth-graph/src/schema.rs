//! Neo4j schema initialization (constraints and indexes).

use hearth_core::HearthResult;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

/// Cypher statements for schema initialization.
///
/// Single-key nodes get uniqueness constraints. The family-scoped survey
/// nodes merge on composite keys, which community-edition Neo4j cannot
/// constrain, so they get plain lookup indexes and rely on the MERGE keys
/// for idempotence.
const SCHEMA_STATEMENTS: &[&str] = &[
    // Uniqueness constraints
    "CREATE CONSTRAINT person_user_id IF NOT EXISTS FOR (p:Person) REQUIRE p.userId IS UNIQUE",
    "CREATE CONSTRAINT family_id IF NOT EXISTS FOR (f:Family) REQUIRE f.familyId IS UNIQUE",
    "CREATE CONSTRAINT task_id IF NOT EXISTS FOR (t:Task) REQUIRE t.taskId IS UNIQUE",
    "CREATE CONSTRAINT event_id IF NOT EXISTS FOR (e:Event) REQUIRE e.eventId IS UNIQUE",
    "CREATE CONSTRAINT responsibility_card IF NOT EXISTS FOR (r:Responsibility) REQUIRE r.cardName IS UNIQUE",
    // Lookup indexes for composite-keyed nodes
    "CREATE INDEX survey_lookup IF NOT EXISTS FOR (s:Survey) ON (s.surveyId, s.familyId)",
    "CREATE INDEX question_lookup IF NOT EXISTS FOR (q:Question) ON (q.questionKey, q.familyId)",
    "CREATE INDEX response_lookup IF NOT EXISTS FOR (r:SurveyResponse) ON (r.responseId, r.familyId)",
    "CREATE INDEX person_family IF NOT EXISTS FOR (p:Person) ON (p.familyId)",
];

/// Initialize Neo4j schema with constraints and indexes.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> HearthResult<()> {
    info!("Initializing Neo4j schema...");

    for statement in SCHEMA_STATEMENTS {
        client.execute_write(Query::new(statement.to_string())).await?;
    }

    info!("Neo4j schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
