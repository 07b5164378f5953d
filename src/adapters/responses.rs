use crate::domain::model::ResponseRecord;
use crate::domain::ports::{ResponseStore, Storage};
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;

const RESPONSES_KEY: &str = "webhook_responses.json";

/// Response history persisted as one JSON array under a fixed key, newest
/// first. Growth is unbounded; there is no eviction.
pub struct FileResponseStore<S: Storage> {
    storage: S,
}

impl<S: Storage> FileResponseStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> ResponseStore for FileResponseStore<S> {
    async fn load(&self) -> Result<Vec<ResponseRecord>> {
        let bytes = match self.storage.read_file(RESPONSES_KEY).await {
            Ok(bytes) => bytes,
            Err(_) => return Ok(Vec::new()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(responses) => Ok(responses),
            Err(e) => {
                tracing::warn!("Failed to parse stored responses: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Read-modify-write with no locking; the store assumes a single active
    /// operator session.
    async fn prepend(&self, responses: &[ResponseRecord]) -> Result<()> {
        let mut all = responses.to_vec();
        all.extend(self.load().await?);

        let bytes = serde_json::to_vec(&all)?;
        self.storage.write_file(RESPONSES_KEY, &bytes).await
    }

    async fn clear(&self) -> Result<()> {
        match self.storage.remove_file(RESPONSES_KEY).await {
            Ok(()) => Ok(()),
            Err(RelayError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
