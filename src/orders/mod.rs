//! Order subsystem: menu-snapshot pricing, authorization, and the service
//! facade orchestrating order creation, status updates, and live streams.

mod access;
mod pricing;
mod service;

pub use access::OrderAccess;
pub use pricing::{totals, MenuResolver, OrderItemRequest, Totals};
pub use service::{CreateOrderRequest, OrderService, UpdateStatusRequest};

use crate::storage::StorageError;
use thiserror::Error;

/// Order operation errors.
///
/// The first three map directly onto client responses (404/400/403) in an
/// HTTP embedding; `Storage` is the generic unexpected-error surface.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Unknown hotel, menu, or order reference.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed item reference, unavailable item, or missing required
    /// delivery address.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Actor is not allowed to view or manage the order.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Persistence failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for order operations.
pub type Result<T> = std::result::Result<T, OrderError>;
