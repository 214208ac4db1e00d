//! In-memory implementation of the storage traits.
//!
//! Used by tests and by runs without a configured database. Orders live in a
//! plain Vec in insertion order, so newest-first listing is deterministic
//! even when timestamps collide.

use crate::domain::{Hotel, Menu, Order};
use crate::storage::{HotelStore, MenuStore, OrderStore, StorageError};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// MemoryStore keeps orders, menus, and hotels in process memory.
#[derive(Default)]
pub struct MemoryStore {
    orders: RwLock<Vec<Order>>,
    menus: RwLock<Vec<Menu>>,
    hotels: RwLock<Vec<Hotel>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hotel. Seeding helper for tests and demo runs.
    pub async fn insert_hotel(&self, hotel: Hotel) {
        self.hotels.write().await.push(hotel);
    }

    /// Adds a menu. Seeding helper for tests and demo runs.
    pub async fn insert_menu(&self, menu: Menu) {
        self.menus.write().await.push(menu);
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: Order) -> Result<Order, StorageError> {
        let mut order = order;
        order.id = Uuid::new_v4().to_string();
        let now = Utc::now();
        order.created_at = now;
        order.updated_at = now;

        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StorageError> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|order| order.id == id).cloned())
    }

    async fn find_by_customer(&self, customer_id: &str) -> Result<Vec<Order>, StorageError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .rev()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn save(&self, order: &Order) -> Result<(), StorageError> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|stored| stored.id == order.id) {
            Some(stored) => {
                *stored = order.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound(format!("order {}", order.id))),
        }
    }
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn find_active_by_hotel(&self, hotel_id: &str) -> Result<Option<Menu>, StorageError> {
        let menus = self.menus.read().await;
        Ok(menus
            .iter()
            .find(|menu| menu.hotel_id == hotel_id && menu.is_active)
            .cloned())
    }
}

#[async_trait]
impl HotelStore for MemoryStore {
    async fn find_by_id_and_owner(
        &self,
        hotel_id: &str,
        owner_id: &str,
    ) -> Result<Option<Hotel>, StorageError> {
        let hotels = self.hotels.read().await;
        Ok(hotels
            .iter()
            .find(|hotel| hotel.id == hotel_id && hotel.owner_id == owner_id)
            .cloned())
    }
}
