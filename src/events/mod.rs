//! Event shapes published for order changes, and the broadcast hub that
//! fans them out to live subscribers.

mod hub;

pub use hub::{OrderEventHub, OrderSubscription};

use crate::domain::{FulfillmentType, Order, OrderStatus, PaymentStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// LatestUpdate summarizes the most recent timeline entry of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestUpdate {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

/// OrderEventPayload is the field set shared by every order event.
///
/// It summarizes current order state rather than carrying the full timeline,
/// so stream frames stay small regardless of order age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEventPayload {
    pub order_id: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub fulfillment_type: FulfillmentType,
    pub estimated_ready_time: Option<DateTime<Utc>>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    pub latest_update: Option<LatestUpdate>,
    /// Timestamp is when the event itself was built.
    pub timestamp: DateTime<Utc>,
}

/// OrderEvent is the closed union of everything published on an order's
/// channel. Serialized with a `type` tag of "created", "status-update", or
/// "snapshot".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OrderEvent {
    /// Published once when the order is placed.
    Created(OrderEventPayload),
    /// Published on every status transition.
    StatusUpdate(OrderEventPayload),
    /// Synthesized on subscribe; never stored or republished.
    Snapshot(OrderEventPayload),
}

impl OrderEvent {
    /// Builds the "created" event for a freshly placed order.
    pub fn created(order: &Order) -> Self {
        OrderEvent::Created(build_payload(order))
    }

    /// Builds the "status-update" event after a transition.
    pub fn status_update(order: &Order) -> Self {
        OrderEvent::StatusUpdate(build_payload(order))
    }

    /// Builds the "snapshot" event from current order state.
    pub fn snapshot(order: &Order) -> Self {
        OrderEvent::Snapshot(build_payload(order))
    }

    /// Returns the shared payload regardless of variant.
    pub fn payload(&self) -> &OrderEventPayload {
        match self {
            OrderEvent::Created(p) | OrderEvent::StatusUpdate(p) | OrderEvent::Snapshot(p) => p,
        }
    }
}

impl fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderEvent::Created(_) => write!(f, "created"),
            OrderEvent::StatusUpdate(_) => write!(f, "status-update"),
            OrderEvent::Snapshot(_) => write!(f, "snapshot"),
        }
    }
}

fn build_payload(order: &Order) -> OrderEventPayload {
    OrderEventPayload {
        order_id: order.id.clone(),
        status: order.status,
        total_amount: order.total_amount,
        payment_status: order.payment_status,
        fulfillment_type: order.fulfillment_type,
        estimated_ready_time: order.estimated_ready_time,
        estimated_delivery_time: order.estimated_delivery_time,
        latest_update: order.latest_update().map(|entry| LatestUpdate {
            status: entry.status,
            timestamp: entry.timestamp,
            notes: entry.notes.clone(),
        }),
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_order() -> Order {
        Order::place(
            "hotel-1".to_string(),
            "cust-1".to_string(),
            "Asha".to_string(),
            "+4477000000".to_string(),
            vec![],
            Decimal::new(2000, 2),
            Decimal::new(2000, 2),
            FulfillmentType::Pickup,
            None,
        )
    }

    #[test]
    fn test_event_tags_serialize_kebab_case() {
        let order = sample_order();

        let json = serde_json::to_value(OrderEvent::status_update(&order)).unwrap();
        assert_eq!(json["type"], "status-update");

        let json = serde_json::to_value(OrderEvent::snapshot(&order)).unwrap();
        assert_eq!(json["type"], "snapshot");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_payload_summarizes_latest_update() {
        let mut order = sample_order();
        order.apply_transition(
            OrderStatus::Confirmed,
            Some("On it".to_string()),
            "owner-1",
            None,
            None,
        );

        let event = OrderEvent::status_update(&order);
        let latest = event.payload().latest_update.as_ref().unwrap();
        assert_eq!(latest.status, OrderStatus::Confirmed);
        assert_eq!(latest.notes.as_deref(), Some("On it"));
        assert_eq!(event.payload().status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_display_matches_wire_tag() {
        let order = sample_order();
        assert_eq!(OrderEvent::created(&order).to_string(), "created");
        assert_eq!(OrderEvent::status_update(&order).to_string(), "status-update");
        assert_eq!(OrderEvent::snapshot(&order).to_string(), "snapshot");
    }
}
