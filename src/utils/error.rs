use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Header validation failure. Fatal to the whole upload; names every
    /// missing column.
    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Per-record validation failure, localized to that record.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The webhook answered with a non-2xx status.
    #[error("Webhook responded with status: {status}")]
    WebhookStatus { status: u16 },

    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Data processing error: {message}")]
    Processing { message: String },
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_names_every_column() {
        let err = RelayError::MissingColumns {
            columns: vec!["KE".to_string(), "mobile".to_string()],
        };
        assert_eq!(err.to_string(), "Missing required columns: KE, mobile");
    }

    #[test]
    fn record_level_errors_match_the_wire_wording() {
        let err = RelayError::MissingField {
            field: "mobile".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required field: mobile");

        let err = RelayError::WebhookStatus { status: 500 };
        assert_eq!(err.to_string(), "Webhook responded with status: 500");
    }
}
