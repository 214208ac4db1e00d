//! Application wiring for the ordering service.
//!
//! Builds the storage backend from configuration, assembles the order
//! service and event hub, and owns the run/stop lifecycle.

mod error;

pub use error::AppError;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::config::Config;
use crate::events::OrderEventHub;
use crate::orders::OrderService;
use crate::storage::{
    HotelStore, MemoryStore, MenuStore, OrderStore, SqliteStore, SqliteStoreConfig,
};

/// Ordering application: configured stores, event hub, and order service.
pub struct App {
    cfg: Config,
    service: Arc<OrderService>,
    hub: OrderEventHub,
    sqlite: Option<Arc<SqliteStore>>,
    running: Mutex<bool>,
}

impl App {
    /// Creates an App from a config file path.
    pub async fn from_config_path(path: &str) -> Result<Self, AppError> {
        let cfg = Config::load(path)?;
        Self::from_config(cfg).await
    }

    /// Creates an App from an already-loaded config.
    ///
    /// Uses the SQLite store when storage is enabled, otherwise the
    /// in-memory store.
    pub async fn from_config(cfg: Config) -> Result<Self, AppError> {
        let hub = OrderEventHub::new();

        let mut sqlite = None;

        let (orders, menus, hotels): (
            Arc<dyn OrderStore>,
            Arc<dyn MenuStore>,
            Arc<dyn HotelStore>,
        ) = match cfg.storage {
            Some(ref storage) if storage.enabled => {
                let mut store_config = SqliteStoreConfig::default();
                if let Some(ref path) = storage.path {
                    store_config.path = path.clone();
                }
                if let Some(max_connections) = storage.max_connections {
                    store_config.max_connections = max_connections;
                }

                let store = Arc::new(SqliteStore::new(store_config).await?);
                info!(path = %storage.path.as_deref().unwrap_or_default(), "SQLite store opened");

                sqlite = Some(Arc::clone(&store));
                (store.clone(), store.clone(), store)
            }
            _ => {
                let store = Arc::new(MemoryStore::new());
                info!("Using in-memory store");
                (store.clone(), store.clone(), store)
            }
        };

        let service = Arc::new(OrderService::new(orders, menus, hotels, hub.clone()));

        Ok(App {
            cfg,
            service,
            hub,
            sqlite,
            running: Mutex::new(false),
        })
    }

    /// Returns the order service.
    pub fn service(&self) -> Arc<OrderService> {
        Arc::clone(&self.service)
    }

    /// Returns the event hub.
    pub fn hub(&self) -> &OrderEventHub {
        &self.hub
    }

    /// Starts the application and blocks until a shutdown signal arrives.
    pub async fn run(&self) -> Result<(), AppError> {
        {
            let mut running = self.running.lock().await;
            if *running {
                return Err(AppError::AlreadyRunning);
            }
            *running = true;
        }

        info!(
            app = %self.cfg.app.name,
            env = %self.cfg.app.env,
            persistent = self.sqlite.is_some(),
            "Ordering service started"
        );

        tokio::signal::ctrl_c().await?;

        info!("Shutdown signal received");

        Ok(())
    }

    /// Stops the application and releases storage resources.
    pub async fn stop(&self) -> Result<(), AppError> {
        {
            let mut running = self.running.lock().await;
            if !*running {
                return Ok(());
            }
            *running = false;
        }

        info!("Stopping ordering service...");

        if let Some(ref sqlite) = self.sqlite {
            sqlite.close().await;
        }

        info!("Ordering service stopped");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, StorageConfig};

    fn memory_config() -> Config {
        Config {
            app: AppConfig {
                name: "orderstream".to_string(),
                env: "test".to_string(),
                log_level: None,
            },
            storage: None,
        }
    }

    #[tokio::test]
    async fn test_from_config_memory_backend() {
        let app = App::from_config(memory_config()).await.unwrap();
        assert!(app.sqlite.is_none());
    }

    #[tokio::test]
    async fn test_from_config_sqlite_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("orders.db");

        let mut cfg = memory_config();
        cfg.storage = Some(StorageConfig {
            enabled: true,
            path: Some(path.to_str().unwrap().to_string()),
            max_connections: Some(2),
        });

        let app = App::from_config(cfg).await.unwrap();
        assert!(app.sqlite.is_some());

        app.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_without_run_is_noop() {
        let app = App::from_config(memory_config()).await.unwrap();
        assert!(app.stop().await.is_ok());
    }
}
