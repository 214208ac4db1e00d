//! Domain models for hotels, menus, actors, and orders.

mod actor;
mod hotel;
mod menu;
mod order;

pub use actor::{Actor, Role};
pub use hotel::Hotel;
pub use menu::{Menu, MenuCategory, MenuItem};
pub use order::{
    DeliveryAddress, FulfillmentType, Order, OrderItem, OrderStatus, PaymentStatus, StatusEntry,
};
