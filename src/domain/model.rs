use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shortcode identifying the sending service, included in every outbound payload.
pub const SHORTCODE: &str = "22317";

/// Columns every uploaded CSV must carry. Header validation fails naming all
/// missing entries, not just the first.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Firstname",
    "Surname",
    "email",
    "displayname",
    "dateofbirth",
    "KE",
    "Secondary",
    "mobile",
];

/// One CSV row keyed by header name. Values may be empty strings; absent keys
/// read as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub shortcode: String,
    pub mobile: String,
    pub message: String,
}

/// Response envelope for one successfully dispatched record. Fields the
/// application relies on are typed; whatever else the webhook returned is kept
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub timestamp: String,
    pub message: String,
    pub data: WebhookPayload,
    #[serde(rename = "recordIndex", default)]
    pub record_index: usize,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Per-record dispatch result, consumed immediately by the batch aggregate.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    Success { response: ResponseRecord },
    Failure { reason: String },
}

/// Aggregated outcome of one uploaded batch.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub errors: Vec<String>,
    pub responses: Vec<ResponseRecord>,
}

impl BatchResult {
    pub fn absorb(&mut self, outcome: DispatchOutcome) {
        match outcome {
            DispatchOutcome::Success { response } => {
                self.responses.push(response);
                self.success_count += 1;
            }
            DispatchOutcome::Failure { reason } => {
                self.errors.push(reason);
                self.failed_count += 1;
            }
        }
    }

    /// Records attempted so far. After a full pass this equals the input
    /// length: pre-dispatch validation failures count as failed.
    pub fn attempted(&self) -> usize {
        self.success_count + self.failed_count
    }
}

/// Webhook endpoint configuration. Read by the dispatcher, never mutated by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub webhook_url: String,
    pub auth_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub role: String,
    pub email: String,
}
