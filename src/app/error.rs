//! Application error types.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("application is already running")]
    AlreadyRunning,
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
    #[error("signal error: {0}")]
    Signal(#[from] std::io::Error),
}
