pub mod adapters;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{FileResponseStore, FileSettingsStore, FileUserStore, LocalStorage};
pub use crate::core::{dispatch::Dispatcher, engine::RelayEngine, parser::parse};
pub use crate::domain::model::{
    BatchResult, RawRecord, ResponseRecord, Settings, User, WebhookPayload,
};
pub use crate::utils::error::{RelayError, Result};
