//! Firestore REST client (read-only).

use serde_json::{json, Value};
use tracing::debug;

use crate::value::decode_document_fields;
use crate::{FirestoreError, FirestoreResult};

/// Configuration for reaching the document store.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    /// Emulator host (`host:port`); switches the client to plain HTTP.
    pub emulator_host: Option<String>,
    /// OAuth bearer token; the emulator needs none.
    pub token: Option<String>,
}

impl FirestoreConfig {
    /// Read settings from the environment. `FIRESTORE_PROJECT_ID` is
    /// required; `FIRESTORE_EMULATOR_HOST` and `GOOGLE_OAUTH_TOKEN` are
    /// optional.
    pub fn from_env() -> FirestoreResult<Self> {
        let project_id = std::env::var("FIRESTORE_PROJECT_ID")
            .map_err(|_| FirestoreError::Config("FIRESTORE_PROJECT_ID is not set".to_string()))?;
        let emulator_host = std::env::var("FIRESTORE_EMULATOR_HOST").ok();
        let token = std::env::var("GOOGLE_OAUTH_TOKEN").ok();

        Ok(Self {
            project_id,
            emulator_host,
            token,
        })
    }

    fn documents_url(&self) -> String {
        let base = match &self.emulator_host {
            Some(host) => format!("http://{host}/v1"),
            None => "https://firestore.googleapis.com/v1".to_string(),
        };
        format!(
            "{base}/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }
}

/// A document read back from the store: its id and decoded body.
#[derive(Debug, Clone)]
pub struct FirestoreDocument {
    pub id: String,
    pub data: Value,
}

/// Client for Firestore document reads.
#[derive(Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    config: FirestoreConfig,
}

impl FirestoreClient {
    pub fn new(config: FirestoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Query every document of a collection belonging to one family.
    pub async fn query_collection(
        &self,
        collection: &str,
        family_id: &str,
    ) -> FirestoreResult<Vec<FirestoreDocument>> {
        let url = format!("{}:runQuery", self.config.documents_url());
        let body = json!({
            "structuredQuery": {
                "from": [{"collectionId": collection}],
                "where": {
                    "fieldFilter": {
                        "field": {"fieldPath": "familyId"},
                        "op": "EQUAL",
                        "value": {"stringValue": family_id}
                    }
                }
            }
        });

        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        let rows: Vec<Value> = response.json().await?;

        let mut documents = Vec::new();
        for row in &rows {
            // runQuery interleaves readTime-only rows with document rows.
            let Some(doc) = row.get("document") else {
                continue;
            };
            documents.push(Self::decode_document(doc)?);
        }

        debug!(collection, family_id, count = documents.len(), "Queried collection");
        Ok(documents)
    }

    fn decode_document(doc: &Value) -> FirestoreResult<FirestoreDocument> {
        let name = doc
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| FirestoreError::Decode("document without a name".to_string()))?;
        let id = name
            .rsplit('/')
            .next()
            .unwrap_or(name)
            .to_string();

        let data = match doc.get("fields").and_then(Value::as_object) {
            Some(fields) => decode_document_fields(fields),
            None => json!({}),
        };

        Ok(FirestoreDocument { id, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_url_switches_on_emulator() {
        let config = FirestoreConfig {
            project_id: "hearth-dev".to_string(),
            emulator_host: Some("localhost:8080".to_string()),
            token: None,
        };
        assert_eq!(
            config.documents_url(),
            "http://localhost:8080/v1/projects/hearth-dev/databases/(default)/documents"
        );

        let config = FirestoreConfig {
            project_id: "hearth-prod".to_string(),
            emulator_host: None,
            token: None,
        };
        assert!(config.documents_url().starts_with("https://firestore.googleapis.com/v1/"));
    }

    #[test]
    fn test_decode_document_extracts_id_and_fields() {
        let doc = json!({
            "name": "projects/hearth-dev/databases/(default)/documents/tasks/task-7",
            "fields": {
                "title": {"stringValue": "Book dentist"},
                "priority": {"stringValue": "high"}
            }
        });
        let decoded = FirestoreClient::decode_document(&doc).unwrap();
        assert_eq!(decoded.id, "task-7");
        assert_eq!(decoded.data["title"], "Book dentist");
    }
}
