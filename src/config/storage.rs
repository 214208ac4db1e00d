//! Storage configuration.

use serde::Deserialize;

/// Persistence settings for orders, menus, and hotels.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Whether SQLite persistence is active. When false the service runs on
    /// the in-memory store.
    #[serde(default)]
    pub enabled: bool,
    /// Path to the SQLite database file.
    pub path: Option<String>,
    /// Maximum number of pooled connections.
    pub max_connections: Option<u32>,
}
