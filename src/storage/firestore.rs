//! Firestore REST client.
//!
//! Writes reports into a Firestore collection through the public REST API,
//! the same create-only operation a browser client performs with an auto-id
//! add. Document ids are assigned by Firestore; the report's own `id` is
//! stored as an ordinary field.
//!
//! # API Reference
//!
//! See: <https://firebase.google.com/docs/firestore/reference/rest/v1/projects.databases.documents/createDocument>

use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::PersistenceError;
use crate::model::Report;

/// Header carrying the API key, so it never appears in a request URL.
const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Report fields stored as Firestore timestamps rather than strings.
const TIMESTAMP_FIELDS: [&str; 2] = ["submittedAt", "estimatedResolution"];

/// Client for creating documents in a Firestore database.
#[derive(Clone)]
pub struct FirestoreClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    api_key: String,
}

impl FirestoreClient {
    /// Create a client for a project.
    ///
    /// `base_url` is the public Google endpoint in production, or an
    /// emulator's address.
    pub fn with_base_url(base_url: &str, project_id: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.base_url,
            urlencoding::encode(&self.project_id),
            urlencoding::encode(collection)
        )
    }

    /// Create a new document holding `report` in `collection`.
    ///
    /// Any non-2xx answer is a [`PersistenceError::Rejected`] carrying the
    /// message Firestore put in its error body, if any. Once Firestore
    /// answers 2xx the document exists, so an unreadable success body is
    /// not an error.
    pub async fn create(&self, collection: &str, report: &Report) -> Result<(), PersistenceError> {
        let body = json!({ "fields": encode_fields(report)? });

        let response = self
            .client
            .post(self.collection_url(collection))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PersistenceError::Rejected {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        match response.json::<CreatedDocument>().await {
            Ok(created) => {
                debug!(document = %created.name, report_id = %report.id, "Firestore document created")
            }
            Err(e) => {
                debug!(report_id = %report.id, error = %e.without_url(), "Firestore document created, response body unreadable")
            }
        }

        Ok(())
    }
}

/// The part of a created document we care about.
#[derive(Debug, Deserialize)]
struct CreatedDocument {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Pull `error.message` out of a Firestore error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Encode a report as a Firestore `fields` map.
pub fn encode_fields(report: &Report) -> Result<Value, PersistenceError> {
    let Value::Object(document) = serde_json::to_value(report)? else {
        return Ok(Value::Object(Map::new()));
    };

    let fields = document
        .into_iter()
        .map(|(key, value)| {
            let encoded = match value {
                Value::String(ts) if TIMESTAMP_FIELDS.contains(&key.as_str()) => {
                    json!({ "timestampValue": ts })
                }
                other => encode_value(other),
            };
            (key, encoded)
        })
        .collect();

    Ok(Value::Object(fields))
}

/// Convert a plain JSON value into Firestore's typed value representation.
fn encode_value(value: Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // Firestore carries 64-bit integers as strings
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            if items.is_empty() {
                json!({ "arrayValue": {} })
            } else {
                let values: Vec<Value> = items.into_iter().map(encode_value).collect();
                json!({ "arrayValue": { "values": values } })
            }
        }
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, encode_value(v)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}
