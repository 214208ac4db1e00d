//! SQLite implementation of the order, menu, and hotel stores.
//!
//! Rows are document-style: a handful of indexed columns for lookups plus a
//! JSON `document` column holding the full serialized value (items, timeline,
//! and address nested inside the order document).

use crate::domain::{Hotel, Menu, Order};
use crate::storage::{HotelStore, MenuStore, OrderStore, StorageError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// SqliteStore implements the storage traits using SQLite.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

/// SqliteStoreConfig holds SQLite storage configuration.
#[derive(Debug, Clone)]
pub struct SqliteStoreConfig {
    /// Path to the SQLite database file.
    pub path: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self {
            path: "orders.db".to_string(),
            max_connections: 5,
        }
    }
}

impl SqliteStore {
    /// Creates a new SQLite store instance.
    pub async fn new(config: SqliteStoreConfig) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", config.path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };

        store.migrate().await?;

        info!(path = %config.path, "SQLite store initialized");
        Ok(store)
    }

    /// Runs database migrations to create the schema.
    async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                hotel_id TEXT NOT NULL,
                customer_id TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                document TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id, created_at)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_hotel_status ON orders(hotel_id, status)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS menus (
                id TEXT PRIMARY KEY,
                hotel_id TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 0,
                document TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_menus_hotel_active ON menus(hotel_id, is_active)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS hotels (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                document TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a hotel row. Seeding helper; hotel CRUD proper lives in the
    /// hotel-management collaborator.
    pub async fn insert_hotel(&self, hotel: &Hotel) -> Result<(), StorageError> {
        let document = encode(hotel)?;
        sqlx::query("INSERT OR REPLACE INTO hotels (id, owner_id, document) VALUES (?1, ?2, ?3)")
            .bind(&hotel.id)
            .bind(&hotel.owner_id)
            .bind(document)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Inserts a menu row. Seeding helper, see [`SqliteStore::insert_hotel`].
    pub async fn insert_menu(&self, menu: &Menu) -> Result<(), StorageError> {
        let document = encode(menu)?;
        sqlx::query(
            "INSERT OR REPLACE INTO menus (id, hotel_id, is_active, document) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&menu.id)
        .bind(&menu.hotel_id)
        .bind(menu.is_active)
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Closes the underlying connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl OrderStore for SqliteStore {
    async fn insert(&self, order: Order) -> Result<Order, StorageError> {
        let mut order = order;
        order.id = Uuid::new_v4().to_string();
        let now = Utc::now();
        order.created_at = now;
        order.updated_at = now;

        let document = encode(&order)?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, hotel_id, customer_id, status, created_at, document)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&order.id)
        .bind(&order.hotel_id)
        .bind(&order.customer_id)
        .bind(order.status.to_string())
        .bind(order.created_at.to_rfc3339())
        .bind(document)
        .execute(&self.pool)
        .await?;

        debug!(order_id = %order.id, hotel_id = %order.hotel_id, "Order inserted");
        Ok(order)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StorageError> {
        let row = sqlx::query("SELECT document FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let document: String = row.try_get("document")?;
                Ok(Some(decode(&document)?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_customer(&self, customer_id: &str) -> Result<Vec<Order>, StorageError> {
        let rows = sqlx::query(
            "SELECT document FROM orders WHERE customer_id = ? ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let document: String = row.try_get("document")?;
                decode(&document)
            })
            .collect()
    }

    async fn save(&self, order: &Order) -> Result<(), StorageError> {
        let document = encode(order)?;

        let result = sqlx::query("UPDATE orders SET status = ?1, document = ?2 WHERE id = ?3")
            .bind(order.status.to_string())
            .bind(document)
            .bind(&order.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("order {}", order.id)));
        }

        debug!(order_id = %order.id, status = %order.status, "Order saved");
        Ok(())
    }
}

#[async_trait]
impl MenuStore for SqliteStore {
    async fn find_active_by_hotel(&self, hotel_id: &str) -> Result<Option<Menu>, StorageError> {
        let row = sqlx::query("SELECT document FROM menus WHERE hotel_id = ? AND is_active = 1")
            .bind(hotel_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let document: String = row.try_get("document")?;
                Ok(Some(decode(&document)?))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl HotelStore for SqliteStore {
    async fn find_by_id_and_owner(
        &self,
        hotel_id: &str,
        owner_id: &str,
    ) -> Result<Option<Hotel>, StorageError> {
        let row = sqlx::query("SELECT document FROM hotels WHERE id = ? AND owner_id = ?")
            .bind(hotel_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let document: String = row.try_get("document")?;
                Ok(Some(decode(&document)?))
            }
            None => Ok(None),
        }
    }
}

/// Serializes a value into its JSON document column.
fn encode<T: serde::Serialize>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::InvalidData(e.to_string()))
}

/// Deserializes a value from its JSON document column.
fn decode<T: serde::de::DeserializeOwned>(document: &str) -> Result<T, StorageError> {
    serde_json::from_str(document).map_err(|e| StorageError::InvalidData(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FulfillmentType, MenuCategory, MenuItem, OrderStatus};
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    async fn open_store(dir: &TempDir) -> SqliteStore {
        let path = dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .into_owned();
        SqliteStore::new(SqliteStoreConfig {
            path,
            max_connections: 2,
        })
        .await
        .unwrap()
    }

    fn sample_order(customer_id: &str) -> Order {
        Order::place(
            "hotel-1".to_string(),
            customer_id.to_string(),
            "Asha".to_string(),
            "+4477000000".to_string(),
            vec![],
            Decimal::ZERO,
            Decimal::ZERO,
            FulfillmentType::Pickup,
            None,
        )
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let inserted = store.insert(sample_order("cust-1")).await.unwrap();
        assert!(!inserted.id.is_empty());

        let found = store.find_by_id(&inserted.id).await.unwrap().unwrap();
        assert_eq!(found.customer_id, "cust-1");
        assert_eq!(found.status, OrderStatus::Pending);
        assert_eq!(found.status_timeline.len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        assert!(store.find_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_document() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let mut order = store.insert(sample_order("cust-1")).await.unwrap();
        order.apply_transition(OrderStatus::Confirmed, None, "owner-1", None, None);
        store.save(&order).await.unwrap();

        let found = store.find_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(found.status, OrderStatus::Confirmed);
        assert_eq!(found.status_timeline.len(), 2);
    }

    #[tokio::test]
    async fn test_save_unknown_order_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let mut order = sample_order("cust-1");
        order.id = "ghost".to_string();
        let result = store.save(&order).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_customer_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let first = store.insert(sample_order("cust-1")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.insert(sample_order("cust-1")).await.unwrap();
        store.insert(sample_order("cust-2")).await.unwrap();

        let orders = store.find_by_customer("cust-1").await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
    }

    #[tokio::test]
    async fn test_active_menu_lookup() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let menu = Menu {
            id: "menu-1".to_string(),
            hotel_id: "hotel-1".to_string(),
            name: "Dinner".to_string(),
            is_active: true,
            categories: vec![MenuCategory {
                name: "Mains".to_string(),
                items: vec![MenuItem {
                    id: "item-1".to_string(),
                    name: "Curry".to_string(),
                    description: None,
                    price: Decimal::new(1200, 2),
                    is_available: true,
                    media: vec![],
                }],
            }],
        };
        store.insert_menu(&menu).await.unwrap();

        let inactive = Menu {
            id: "menu-2".to_string(),
            hotel_id: "hotel-2".to_string(),
            name: "Draft".to_string(),
            is_active: false,
            categories: vec![],
        };
        store.insert_menu(&inactive).await.unwrap();

        let found = store.find_active_by_hotel("hotel-1").await.unwrap().unwrap();
        assert_eq!(found.id, "menu-1");
        assert_eq!(found.categories[0].items[0].price, Decimal::new(1200, 2));

        assert!(store.find_active_by_hotel("hotel-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_hotel_ownership_lookup() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let hotel = Hotel {
            id: "hotel-1".to_string(),
            owner_id: "owner-1".to_string(),
            name: "Spice Garden".to_string(),
        };
        store.insert_hotel(&hotel).await.unwrap();

        assert!(store
            .find_by_id_and_owner("hotel-1", "owner-1")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_id_and_owner("hotel-1", "owner-2")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_id_and_owner("hotel-9", "owner-1")
            .await
            .unwrap()
            .is_none());
    }
}
