mod app;
mod config;
mod domain;
mod events;
mod orders;
mod storage;

use app::App;
use config::Config;
use domain::{Actor, DeliveryAddress, Hotel, Menu, MenuCategory, MenuItem, OrderStatus, Role};
use events::OrderEventHub;
use orders::{CreateOrderRequest, OrderItemRequest, OrderService, UpdateStatusRequest};
use rust_decimal::Decimal;
use std::env;
use std::sync::Arc;
use storage::{HotelStore, MemoryStore, MenuStore, OrderStore};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

fn parse_config_path() -> String {
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            return path.to_string();
        }
    }
    DEFAULT_CONFIG_PATH.to_string()
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Check for demo mode
    if env::args().any(|arg| arg == "--demo") {
        run_demo().await;
        return;
    }

    // Initialize tracing early so we can see logs from app initialization
    init_tracing(Some("info"));

    let config_path = parse_config_path();

    let app = match App::from_config_path(&config_path).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to create app: {}", e);
            return;
        }
    };

    info!(config = %config_path, "App initialized");

    if let Err(e) = app.run().await {
        error!(error = %e, "App error");
    }

    let _ = app.stop().await;
}

/// Walks the full order lifecycle against the in-memory store: seed a hotel
/// and menu, place an order, subscribe to its updates, and drive a couple of
/// status transitions while logging every event the subscription yields.
async fn run_demo() {
    let config_path = parse_config_path();
    let log_level = Config::load(&config_path)
        .ok()
        .and_then(|c| c.app.log_level);

    init_tracing(log_level.as_deref());

    let store = Arc::new(MemoryStore::new());

    store
        .insert_hotel(Hotel {
            id: "hotel-1".to_string(),
            owner_id: "owner-1".to_string(),
            name: "Spice Garden".to_string(),
        })
        .await;

    store
        .insert_menu(Menu {
            id: "menu-1".to_string(),
            hotel_id: "hotel-1".to_string(),
            name: "Dinner".to_string(),
            is_active: true,
            categories: vec![MenuCategory {
                name: "Mains".to_string(),
                items: vec![
                    MenuItem {
                        id: "item-1".to_string(),
                        name: "Paneer Curry".to_string(),
                        description: Some("House special".to_string()),
                        price: Decimal::new(1000, 2),
                        is_available: true,
                        media: vec![],
                    },
                    MenuItem {
                        id: "item-2".to_string(),
                        name: "Garlic Naan".to_string(),
                        description: None,
                        price: Decimal::new(550, 2),
                        is_available: true,
                        media: vec![],
                    },
                ],
            }],
        })
        .await;

    let orders: Arc<dyn OrderStore> = store.clone();
    let menus: Arc<dyn MenuStore> = store.clone();
    let hotels: Arc<dyn HotelStore> = store;

    let service = OrderService::new(orders, menus, hotels, OrderEventHub::new());

    let customer = Actor::new("cust-1", Role::Customer, "Asha");
    let owner = Actor::new("owner-1", Role::HotelOwner, "Priya");

    let order = match service
        .create_order(
            &customer,
            CreateOrderRequest {
                hotel_id: "hotel-1".to_string(),
                items: vec![
                    OrderItemRequest {
                        id: "item-1".to_string(),
                        quantity: 2,
                        notes: Some("extra spicy".to_string()),
                    },
                    OrderItemRequest {
                        id: "item-2".to_string(),
                        quantity: 3,
                        notes: None,
                    },
                ],
                fulfillment_type: None,
                delivery_address: Some(DeliveryAddress {
                    street: "12 Lake Road".to_string(),
                    city: "Pune".to_string(),
                    instructions: Some("Ring twice".to_string()),
                    coordinates: None,
                }),
                customer_phone: "+91-98000-00000".to_string(),
            },
        )
        .await
    {
        Ok(order) => order,
        Err(e) => {
            error!(error = %e, "Failed to place order");
            return;
        }
    };

    info!(
        order_id = %order.id,
        total = %order.total_amount,
        "Order placed"
    );

    let mut subscription = match service.stream_order(&order.id, &customer).await {
        Ok(subscription) => subscription,
        Err(e) => {
            error!(error = %e, "Failed to subscribe to order updates");
            return;
        }
    };

    if let Some(event) = subscription.recv().await {
        info!(event = %event, status = %event.payload().status, "Received event");
    }

    let transitions = [
        (OrderStatus::Confirmed, Some("accepted by kitchen")),
        (OrderStatus::Preparing, None),
        (OrderStatus::OutForDelivery, Some("driver assigned")),
        (OrderStatus::Delivered, None),
    ];

    for (status, notes) in transitions {
        if let Err(e) = service
            .update_status(
                &order.id,
                &owner,
                UpdateStatusRequest {
                    status,
                    notes: notes.map(str::to_string),
                    estimated_ready_time: None,
                    estimated_delivery_time: None,
                },
            )
            .await
        {
            error!(error = %e, "Failed to update status");
            return;
        }

        if let Some(event) = subscription.recv().await {
            info!(event = %event, status = %event.payload().status, "Received event");
        }
    }

    match service.get_order(&order.id, &customer).await {
        Ok(order) => info!(
            order_id = %order.id,
            status = %order.status,
            timeline_entries = order.status_timeline.len(),
            "Demo completed"
        ),
        Err(e) => error!(error = %e, "Failed to reload order"),
    }
}
