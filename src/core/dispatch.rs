use crate::core::transform::to_payload;
use crate::domain::model::{
    BatchResult, DispatchOutcome, RawRecord, ResponseRecord, Settings, WebhookPayload,
};
use crate::utils::error::{RelayError, Result};
use chrono::Local;
use reqwest::Client;

/// Sends transformed payloads to the webhook, one record at a time.
///
/// Dispatch is strictly sequential: one record, one request, next record.
/// Webhook ordering and per-record error attribution stay deterministic that
/// way. There is no retry and no timeout; a hung webhook stalls the batch.
pub struct Dispatcher {
    client: Client,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Runs the full batch. Record-level failures never abort the pass; every
    /// input record ends up counted exactly once.
    pub async fn dispatch(&self, records: &[RawRecord], settings: &Settings) -> BatchResult {
        let mut result = BatchResult::default();

        for (index, record) in records.iter().enumerate() {
            let outcome = self.process_record(record, index, settings).await;
            if let DispatchOutcome::Failure { reason } = &outcome {
                tracing::warn!("{}", reason);
            }
            result.absorb(outcome);
        }

        tracing::info!(
            "Batch complete: {} succeeded, {} failed",
            result.success_count,
            result.failed_count
        );
        result
    }

    async fn process_record(
        &self,
        record: &RawRecord,
        index: usize,
        settings: &Settings,
    ) -> DispatchOutcome {
        // Cheap validation lives here, not in the transformer: a record with
        // no mobile number fails without a network call.
        if record.get("mobile").is_empty() {
            let reason = format!(
                "Record {}: {}",
                index + 1,
                RelayError::MissingField {
                    field: "mobile".to_string(),
                }
            );
            return DispatchOutcome::Failure { reason };
        }

        match self.send(record, index, settings).await {
            Ok(response) => DispatchOutcome::Success { response },
            Err(e) => DispatchOutcome::Failure {
                reason: format!("Record {}: {}", index + 1, e),
            },
        }
    }

    async fn send(
        &self,
        record: &RawRecord,
        index: usize,
        settings: &Settings,
    ) -> Result<ResponseRecord> {
        let payload = to_payload(record);
        tracing::debug!("Posting record {} to {}", index + 1, settings.webhook_url);

        let response = self
            .client
            .post(&settings.webhook_url)
            .header("Content-Type", "application/json")
            .header("X-Advanta-Token", &settings.auth_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RelayError::WebhookStatus {
                status: status.as_u16(),
            });
        }

        Ok(build_response(&body, payload, record, index))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the stored envelope for one successful dispatch. A body that is not
/// a JSON object is not a failure; it just contributes no merged fields, and
/// the record message falls back to the processed-name form.
fn build_response(
    body: &str,
    payload: WebhookPayload,
    record: &RawRecord,
    index: usize,
) -> ResponseRecord {
    let mut extra = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };

    // The webhook's own message wins; it moves from the merged fields into the
    // typed slot so the envelope serializes with a single message key.
    let message = match extra.remove("message") {
        Some(serde_json::Value::String(message)) => message,
        _ => format!(
            "Processed {} {}",
            record.get("Firstname"),
            record.get("Surname")
        ),
    };

    ResponseRecord {
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        message,
        data: payload,
        record_index: index,
        extra,
    }
}
