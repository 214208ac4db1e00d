//! Storage interfaces and implementations for orders, menus, and hotels.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, SqliteStoreConfig};

use crate::domain::{Hotel, Menu, Order};
use async_trait::async_trait;

/// StorageError represents errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// OrderStore defines the interface for persisting order documents.
///
/// Orders are written as whole documents: `save` replaces the stored order,
/// nested items and timeline included.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert persists a new order, assigning its id and the store-managed
    /// timestamps. Returns the stored order.
    async fn insert(&self, order: Order) -> Result<Order, StorageError>;

    /// FindByID retrieves an order by its id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StorageError>;

    /// FindByCustomer retrieves a customer's orders, newest first.
    async fn find_by_customer(&self, customer_id: &str) -> Result<Vec<Order>, StorageError>;

    /// Save replaces an existing order document in full.
    /// Returns NotFound if the order does not exist.
    async fn save(&self, order: &Order) -> Result<(), StorageError>;
}

/// MenuStore exposes the single lookup the order subsystem needs from the
/// menu-management collaborator.
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// FindActiveByHotel returns the hotel's active menu, if any.
    /// At most one menu is active per hotel (enforced by menu management).
    async fn find_active_by_hotel(&self, hotel_id: &str) -> Result<Option<Menu>, StorageError>;
}

/// HotelStore exposes the ownership lookup used by authorization.
#[async_trait]
pub trait HotelStore: Send + Sync {
    /// FindByIDAndOwner returns the hotel only when it exists and is owned
    /// by `owner_id`.
    async fn find_by_id_and_owner(
        &self,
        hotel_id: &str,
        owner_id: &str,
    ) -> Result<Option<Hotel>, StorageError>;
}
