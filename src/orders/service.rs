//! Order service facade: create, list, fetch, transition, and stream.

use super::{totals, MenuResolver, OrderAccess, OrderError, OrderItemRequest, Result};
use crate::domain::{Actor, DeliveryAddress, FulfillmentType, Order, OrderStatus};
use crate::events::{OrderEvent, OrderEventHub, OrderSubscription};
use crate::storage::{HotelStore, MenuStore, OrderStore};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// CreateOrderRequest is the input for placing an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub hotel_id: String,
    pub items: Vec<OrderItemRequest>,
    /// Defaults to delivery when omitted.
    pub fulfillment_type: Option<FulfillmentType>,
    /// Required when the (effective) fulfillment type is delivery.
    pub delivery_address: Option<DeliveryAddress>,
    pub customer_phone: String,
}

/// UpdateStatusRequest is the input for a status transition.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub estimated_ready_time: Option<DateTime<Utc>>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
}

/// OrderService orchestrates pricing, authorization, persistence, and event
/// publication for the order use cases.
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    resolver: MenuResolver,
    access: OrderAccess,
    hub: OrderEventHub,
}

impl OrderService {
    /// Creates the service over its collaborators.
    pub fn new(
        orders: Arc<dyn OrderStore>,
        menus: Arc<dyn MenuStore>,
        hotels: Arc<dyn HotelStore>,
        hub: OrderEventHub,
    ) -> Self {
        Self {
            orders,
            resolver: MenuResolver::new(menus),
            access: OrderAccess::new(hotels),
            hub,
        }
    }

    /// Places a new order for the acting customer.
    ///
    /// Validation fully precedes persistence: item resolution, totals, and
    /// the delivery-address check all happen before the insert, so a
    /// rejected request leaves no partial order behind. Publishes the
    /// "created" event once stored.
    pub async fn create_order(&self, actor: &Actor, request: CreateOrderRequest) -> Result<Order> {
        let items = self.resolver.resolve(&request.hotel_id, &request.items).await?;
        let totals = totals(&items);

        let fulfillment_type = request.fulfillment_type.unwrap_or_default();
        if fulfillment_type.requires_address() && request.delivery_address.is_none() {
            return Err(OrderError::InvalidInput(
                "delivery address is required for delivery orders".to_string(),
            ));
        }

        let order = Order::place(
            request.hotel_id,
            actor.id.clone(),
            actor.name.clone(),
            request.customer_phone,
            items,
            totals.subtotal,
            totals.total_amount,
            fulfillment_type,
            request.delivery_address,
        );

        let order = self.orders.insert(order).await?;

        info!(
            order_id = %order.id,
            hotel_id = %order.hotel_id,
            customer_id = %order.customer_id,
            total = %order.total_amount,
            "Order created"
        );

        self.hub.publish(&order.id, OrderEvent::created(&order));
        Ok(order)
    }

    /// Lists the acting customer's orders, newest first.
    pub async fn list_customer_orders(&self, actor: &Actor) -> Result<Vec<Order>> {
        Ok(self.orders.find_by_customer(&actor.id).await?)
    }

    /// Fetches one order, enforcing the view permission.
    pub async fn get_order(&self, order_id: &str, actor: &Actor) -> Result<Order> {
        let order = self.load(order_id).await?;
        if !self.access.can_view(&order, actor).await? {
            return Err(OrderError::Forbidden(
                "you are not allowed to access this order".to_string(),
            ));
        }
        Ok(order)
    }

    /// Transitions an order's status, persisting the whole document and
    /// publishing the "status-update" event.
    pub async fn update_status(
        &self,
        order_id: &str,
        actor: &Actor,
        request: UpdateStatusRequest,
    ) -> Result<Order> {
        let mut order = self.load(order_id).await?;
        if !self.access.can_manage(&order, actor).await? {
            return Err(OrderError::Forbidden(
                "you are not allowed to update this order".to_string(),
            ));
        }

        let from = order.status;
        if !order.apply_transition(
            request.status,
            request.notes,
            &actor.id,
            request.estimated_ready_time,
            request.estimated_delivery_time,
        ) {
            return Err(OrderError::InvalidInput(format!(
                "cannot move order from {} to {}",
                from, request.status
            )));
        }

        self.orders.save(&order).await?;

        info!(
            order_id = %order.id,
            from = %from,
            to = %order.status,
            actor_id = %actor.id,
            "Order status updated"
        );

        self.hub.publish(&order.id, OrderEvent::status_update(&order));
        Ok(order)
    }

    /// Opens a live event stream for an order.
    ///
    /// Requires the view permission. The first event is a freshly built
    /// snapshot of current order state; subsequent events arrive as they
    /// are published, until the subscription is dropped.
    pub async fn stream_order(&self, order_id: &str, actor: &Actor) -> Result<OrderSubscription> {
        let order = self.get_order(order_id, actor).await?;
        Ok(self.hub.subscribe(&order.id, Some(OrderEvent::snapshot(&order))))
    }

    async fn load(&self, order_id: &str) -> Result<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("order {}", order_id)))
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
