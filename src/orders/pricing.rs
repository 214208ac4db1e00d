//! Menu snapshot resolution and order totals.
//!
//! Resolving turns requested item ids into priced, frozen line items copied
//! from the hotel's active menu. Orders keep these copies forever; later
//! menu edits never re-price a placed order.

use super::{OrderError, Result};
use crate::domain::OrderItem;
use crate::storage::MenuStore;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

/// OrderItemRequest is one requested line of a create-order call.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    /// ID of the menu item to order.
    pub id: String,
    /// Quantity to order. Must be at least 1.
    pub quantity: u32,
    /// Free-text note for the kitchen.
    pub notes: Option<String>,
}

/// Totals of an order's line items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub total_amount: Decimal,
}

/// Sums line totals into order totals.
///
/// Pure function. `total_amount` currently equals `subtotal`; tax and
/// delivery-fee surcharges will extend this without touching callers.
pub fn totals(items: &[OrderItem]) -> Totals {
    let subtotal: Decimal = items.iter().map(|item| item.line_total).sum();
    Totals {
        subtotal,
        total_amount: subtotal,
    }
}

/// MenuResolver validates requested items against a hotel's active menu and
/// produces immutable priced line items.
pub struct MenuResolver {
    menus: Arc<dyn MenuStore>,
}

impl MenuResolver {
    /// Creates a resolver reading menus from the given store.
    pub fn new(menus: Arc<dyn MenuStore>) -> Self {
        Self { menus }
    }

    /// Resolves requested items against the hotel's active menu.
    ///
    /// Fails with NotFound when the hotel has no active menu, and with
    /// InvalidInput when the request is empty, a quantity is zero, an id is
    /// blank, or an item is missing or marked unavailable. Pure read; menu
    /// state is never mutated.
    pub async fn resolve(
        &self,
        hotel_id: &str,
        requested: &[OrderItemRequest],
    ) -> Result<Vec<OrderItem>> {
        if requested.is_empty() {
            return Err(OrderError::InvalidInput(
                "order must contain at least one item".to_string(),
            ));
        }

        let menu = self
            .menus
            .find_active_by_hotel(hotel_id)
            .await?
            .ok_or_else(|| {
                OrderError::NotFound(format!("active menu for hotel {}", hotel_id))
            })?;

        requested
            .iter()
            .map(|request| {
                if request.id.trim().is_empty() {
                    return Err(OrderError::InvalidInput("invalid menu item id".to_string()));
                }
                if request.quantity == 0 {
                    return Err(OrderError::InvalidInput(format!(
                        "quantity for menu item {} must be positive",
                        request.id
                    )));
                }

                let item = menu
                    .find_item(&request.id)
                    .filter(|item| item.is_available)
                    .ok_or_else(|| {
                        OrderError::InvalidInput(format!(
                            "menu item {} is unavailable",
                            request.id
                        ))
                    })?;

                Ok(OrderItem {
                    menu_item_id: item.id.clone(),
                    name: item.name.clone(),
                    description: item.description.clone(),
                    unit_price: item.price,
                    quantity: request.quantity,
                    line_total: item.price * Decimal::from(request.quantity),
                    notes: request.notes.clone(),
                    images: item.media.clone(),
                })
            })
            .collect()
    }
}
