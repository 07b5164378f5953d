use crate::domain::model::{BatchResult, ResponseRecord};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_records: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub success_rate: String,
}

/// Exportable view of one processed batch.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingReport {
    pub summary: ReportSummary,
    pub errors: Vec<String>,
    pub responses: Vec<ResponseRecord>,
}

impl ProcessingReport {
    pub fn new(result: &BatchResult, total_records: usize) -> Self {
        let success_rate = if total_records > 0 {
            let rate = (result.success_count as f64 / total_records as f64) * 100.0;
            format!("{}%", rate.round() as u32)
        } else {
            "0%".to_string()
        };

        Self {
            summary: ReportSummary {
                total_records,
                success_count: result.success_count,
                failed_count: result.failed_count,
                success_rate,
            },
            errors: result.errors.clone(),
            responses: result.responses.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Renders the response history as CSV: an unquoted `Timestamp,Message,Data`
/// header, then rows with all three fields double-quoted and embedded quotes
/// doubled. `Data` is the JSON-stringified payload that was sent.
pub fn responses_to_csv(responses: &[ResponseRecord]) -> Result<String> {
    let mut rows = vec!["Timestamp,Message,Data".to_string()];

    for response in responses {
        let data = serde_json::to_string(&response.data)?;
        rows.push(format!(
            "{},{},{}",
            quote(&response.timestamp),
            quote(&response.message),
            quote(&data)
        ));
    }

    Ok(rows.join("\n"))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
