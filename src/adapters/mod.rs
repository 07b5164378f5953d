// Adapters layer: concrete implementations of the domain ports.

pub mod responses;
pub mod settings;
pub mod storage;
pub mod users;

pub use responses::FileResponseStore;
pub use settings::FileSettingsStore;
pub use storage::LocalStorage;
pub use users::FileUserStore;
