use crate::domain::model::{ResponseRecord, Settings, User};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Byte-level storage backend. Adapters decide where the bytes live.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Webhook settings repository. A single process-wide value under a fixed key.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings>;
    async fn save(&self, settings: &Settings) -> Result<()>;
}

/// Response history repository. The history is a single ordered list, newest
/// first, with no eviction.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    async fn load(&self) -> Result<Vec<ResponseRecord>>;
    async fn prepend(&self, responses: &[ResponseRecord]) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// User and credential repository, plus the current operator session.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>>;
    async fn add(&self, user: User, password: &str) -> Result<()>;
    async fn update(&self, user: User) -> Result<()>;
    async fn remove(&self, username: &str) -> Result<()>;
    /// Checks a username/password pair, returning the user on a match.
    async fn verify(&self, username: &str, password: &str) -> Result<Option<User>>;
    async fn current_user(&self) -> Result<Option<User>>;
    async fn set_current_user(&self, user: Option<&User>) -> Result<()>;
}
