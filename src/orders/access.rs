//! Authorization decisions for order operations.

use crate::domain::{Actor, Order, Role};
use crate::storage::{HotelStore, StorageError};
use std::sync::Arc;

/// OrderAccess decides whether an actor may view or mutate an order.
///
/// Decisions are plain booleans over already-loaded data plus one ownership
/// lookup; callers translate a false into their own Forbidden error, which
/// keeps this reusable outside the order service.
pub struct OrderAccess {
    hotels: Arc<dyn HotelStore>,
}

impl OrderAccess {
    /// Creates an access checker resolving ownership via the hotel store.
    pub fn new(hotels: Arc<dyn HotelStore>) -> Self {
        Self { hotels }
    }

    /// True when the actor is the order's customer, an admin, or the owner
    /// of the hotel the order was placed against.
    pub async fn can_view(&self, order: &Order, actor: &Actor) -> Result<bool, StorageError> {
        if order.customer_id == actor.id {
            return Ok(true);
        }
        if actor.role == Role::Admin {
            return Ok(true);
        }
        self.owns_hotel(&order.hotel_id, &actor.id).await
    }

    /// True when the actor is an admin, or a hotel owner who owns the
    /// order's hotel. Customers never manage orders, their own included.
    pub async fn can_manage(&self, order: &Order, actor: &Actor) -> Result<bool, StorageError> {
        match actor.role {
            Role::Admin => Ok(true),
            Role::HotelOwner => self.owns_hotel(&order.hotel_id, &actor.id).await,
            Role::Customer => Ok(false),
        }
    }

    async fn owns_hotel(&self, hotel_id: &str, owner_id: &str) -> Result<bool, StorageError> {
        let hotel = self.hotels.find_by_id_and_owner(hotel_id, owner_id).await?;
        Ok(hotel.is_some())
    }
}
