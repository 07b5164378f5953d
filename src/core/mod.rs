pub mod dispatch;
pub mod engine;
pub mod parser;
pub mod report;
pub mod transform;

pub use crate::domain::model::{BatchResult, RawRecord, ResponseRecord, Settings, WebhookPayload};
pub use crate::domain::ports::{ResponseStore, SettingsStore, Storage, UserStore};
pub use crate::utils::error::Result;
