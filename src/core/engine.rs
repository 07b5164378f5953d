use crate::core::{dispatch::Dispatcher, parser};
use crate::domain::model::{BatchResult, Settings};
use crate::domain::ports::ResponseStore;
use crate::utils::error::Result;

/// Runs one uploaded batch end to end: parse, dispatch, persist responses.
pub struct RelayEngine<R: ResponseStore> {
    dispatcher: Dispatcher,
    responses: R,
}

impl<R: ResponseStore> RelayEngine<R> {
    pub fn new(responses: R) -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            responses,
        }
    }

    /// A parse error aborts before any dispatch; record-level errors are
    /// accumulated in the returned result instead. Failing to persist the
    /// response history does not fail the batch.
    pub async fn run(&self, csv_text: &str, settings: &Settings) -> Result<BatchResult> {
        let records = parser::parse(csv_text)?;
        tracing::info!("Parsed {} records", records.len());

        let result = self.dispatcher.dispatch(&records, settings).await;

        if !result.responses.is_empty() {
            if let Err(e) = self.responses.prepend(&result.responses).await {
                tracing::warn!("Failed to store webhook responses: {}", e);
            }
        }

        Ok(result)
    }
}
