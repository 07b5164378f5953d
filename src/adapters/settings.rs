use crate::domain::model::Settings;
use crate::domain::ports::{SettingsStore, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

const SETTINGS_KEY: &str = "webhook_settings.json";

/// Settings persisted as a single JSON object under a fixed key.
pub struct FileSettingsStore<S: Storage> {
    storage: S,
}

impl<S: Storage> FileSettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> SettingsStore for FileSettingsStore<S> {
    async fn load(&self) -> Result<Settings> {
        let bytes = match self.storage.read_file(SETTINGS_KEY).await {
            Ok(bytes) => bytes,
            Err(_) => return Ok(Settings::default()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!("Failed to parse stored settings: {}", e);
                Ok(Settings::default())
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(settings)?;
        self.storage.write_file(SETTINGS_KEY, &bytes).await
    }
}
