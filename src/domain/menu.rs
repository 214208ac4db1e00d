//! Menu structures as read from the menu-management collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// MenuItem is a single priceable dish on a menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// ID is the opaque item identifier used by order requests.
    pub id: String,
    /// Name of the dish.
    pub name: String,
    /// Description shown to customers (optional).
    pub description: Option<String>,
    /// Price per unit. Never negative.
    pub price: Decimal,
    /// IsAvailable marks whether the item can currently be ordered.
    pub is_available: bool,
    /// Media holds image links for the item.
    #[serde(default)]
    pub media: Vec<String>,
}

/// MenuCategory groups items under a heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    /// Name of the category (e.g., "Starters").
    pub name: String,
    /// Items in this category.
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// Menu is a hotel's list of categories and items.
///
/// The menu-management collaborator guarantees at most one active menu per
/// hotel; the active menu is the source of truth for prices at order time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    /// ID is the opaque menu identifier.
    pub id: String,
    /// HotelID references the hotel this menu belongs to.
    pub hotel_id: String,
    /// Name of the menu.
    pub name: String,
    /// IsActive marks the menu customers order from.
    pub is_active: bool,
    /// Categories holding the menu items.
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
}

impl Menu {
    /// Finds an item by id by scanning all categories.
    ///
    /// Menus are bounded in size, so the linear scan is fine.
    pub fn find_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter())
            .find(|item| item.id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_menu() -> Menu {
        Menu {
            id: "menu-1".to_string(),
            hotel_id: "hotel-1".to_string(),
            name: "Dinner".to_string(),
            is_active: true,
            categories: vec![
                MenuCategory {
                    name: "Starters".to_string(),
                    items: vec![MenuItem {
                        id: "item-1".to_string(),
                        name: "Soup".to_string(),
                        description: None,
                        price: Decimal::new(450, 2),
                        is_available: true,
                        media: vec![],
                    }],
                },
                MenuCategory {
                    name: "Mains".to_string(),
                    items: vec![MenuItem {
                        id: "item-2".to_string(),
                        name: "Curry".to_string(),
                        description: Some("House special".to_string()),
                        price: Decimal::new(1200, 2),
                        is_available: false,
                        media: vec!["https://img.example/curry.jpg".to_string()],
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_find_item_scans_all_categories() {
        let menu = sample_menu();
        assert_eq!(menu.find_item("item-1").unwrap().name, "Soup");
        assert_eq!(menu.find_item("item-2").unwrap().name, "Curry");
    }

    #[test]
    fn test_find_item_unknown_id() {
        let menu = sample_menu();
        assert!(menu.find_item("missing").is_none());
    }
}
