//! Per-order broadcast hub for live status notifications.
//!
//! One channel per order id, created lazily on first subscribe or publish
//! and torn down when the last subscriber leaves. Every subscriber gets its
//! own unbounded queue, so a slow consumer never stalls the publisher or
//! other subscribers. The hub holds no durable state: publishing to an
//! order with no channel drops the event.

use super::OrderEvent;
use futures_util::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Live subscribers of one order, keyed by subscriber id.
#[derive(Default)]
struct Channel {
    subscribers: HashMap<u64, mpsc::UnboundedSender<OrderEvent>>,
}

#[derive(Default)]
struct Registry {
    channels: HashMap<String, Channel>,
    next_subscriber_id: u64,
}

/// OrderEventHub multiplexes order events to live subscribers.
///
/// Cheap to clone; all clones share one registry. Constructed once and
/// injected into the order service rather than reached through a global.
#[derive(Clone, Default)]
pub struct OrderEventHub {
    registry: Arc<Mutex<Registry>>,
}

impl OrderEventHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber for `order_id`.
    ///
    /// If `initial` is supplied it is queued for this subscriber alone,
    /// before any event published after this call — the registration and
    /// the snapshot delivery happen under one registry lock, so no
    /// concurrent publish can slip in between. Dropping the returned
    /// subscription deregisters it and tears the channel down once it was
    /// the last one.
    pub fn subscribe(&self, order_id: &str, initial: Option<OrderEvent>) -> OrderSubscription {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut registry = lock(&self.registry);
        let subscriber_id = registry.next_subscriber_id;
        registry.next_subscriber_id += 1;

        if let Some(event) = initial {
            // Receiver is in scope, the send cannot fail.
            let _ = tx.send(event);
        }

        let channel = registry.channels.entry(order_id.to_string()).or_default();
        channel.subscribers.insert(subscriber_id, tx);

        debug!(
            order_id = %order_id,
            subscriber_id,
            subscribers = channel.subscribers.len(),
            "Subscriber registered"
        );

        OrderSubscription {
            rx,
            registry: Arc::clone(&self.registry),
            order_id: order_id.to_string(),
            subscriber_id,
        }
    }

    /// Delivers `event` to every current subscriber of `order_id`.
    ///
    /// Fire-and-forget: queues are unbounded, so this never blocks, and a
    /// missing channel (nobody listening) is a silent no-op. Subscribers
    /// whose receiving side is already gone are pruned here.
    pub fn publish(&self, order_id: &str, event: OrderEvent) {
        let mut registry = lock(&self.registry);
        let Some(channel) = registry.channels.get_mut(order_id) else {
            trace!(order_id = %order_id, event = %event, "No subscribers, event dropped");
            return;
        };

        channel
            .subscribers
            .retain(|_, tx| tx.send(event.clone()).is_ok());

        debug!(
            order_id = %order_id,
            event = %event,
            subscribers = channel.subscribers.len(),
            "Event published"
        );

        if channel.subscribers.is_empty() {
            registry.channels.remove(order_id);
        }
    }

    /// Returns the number of live subscribers for an order.
    pub fn subscriber_count(&self, order_id: &str) -> usize {
        lock(&self.registry)
            .channels
            .get(order_id)
            .map(|channel| channel.subscribers.len())
            .unwrap_or(0)
    }

    /// Returns the number of orders with at least one subscriber.
    pub fn channel_count(&self) -> usize {
        lock(&self.registry).channels.len()
    }
}

/// OrderSubscription is a live event stream for one order.
///
/// Yields the initial snapshot (if any) first, then every event published to
/// the order in publish order. Dropping it releases the subscriber slot.
pub struct OrderSubscription {
    rx: mpsc::UnboundedReceiver<OrderEvent>,
    registry: Arc<Mutex<Registry>>,
    order_id: String,
    subscriber_id: u64,
}

impl OrderSubscription {
    /// Receives the next event, or None once the subscription is closed.
    pub async fn recv(&mut self) -> Option<OrderEvent> {
        self.rx.recv().await
    }

    /// Returns the order id this subscription follows.
    pub fn order_id(&self) -> &str {
        &self.order_id
    }
}

impl Stream for OrderSubscription {
    type Item = OrderEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl Drop for OrderSubscription {
    fn drop(&mut self) {
        let mut registry = lock(&self.registry);
        if let Some(channel) = registry.channels.get_mut(&self.order_id) {
            channel.subscribers.remove(&self.subscriber_id);
            let remaining = channel.subscribers.len();
            if remaining == 0 {
                registry.channels.remove(&self.order_id);
            }
            debug!(
                order_id = %self.order_id,
                subscriber_id = self.subscriber_id,
                remaining,
                "Subscriber released"
            );
        }
    }
}

/// Locks the registry, recovering the guard if a panicking thread poisoned
/// it; the registry map stays structurally valid either way.
fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
