//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category name
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "super::default_true")]
    pub available: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub available: Option<bool>,
}

/// Partial update; `id` selects the item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub available: Option<bool>,
}

impl MenuItem {
    pub fn apply(&mut self, update: MenuItemUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_is_json_number() {
        let item = MenuItem {
            id: "m1".into(),
            name: "Ramen".into(),
            description: "Soy broth".into(),
            price: Decimal::new(1200, 0),
            category: "Noodles".into(),
            image: None,
            available: true,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], serde_json::json!(1200.0));
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_available_defaults_true() {
        let item: MenuItem = serde_json::from_str(
            r#"{"id":"m1","name":"Tea","description":"Green","price":3.5,"category":"Drinks"}"#,
        )
        .unwrap();
        assert!(item.available);
        assert_eq!(item.price, Decimal::new(35, 1));
    }

    #[test]
    fn test_apply_partial_update() {
        let mut item: MenuItem = serde_json::from_str(
            r#"{"id":"m1","name":"Tea","description":"Green","price":3.5,"category":"Drinks","available":true}"#,
        )
        .unwrap();
        item.apply(MenuItemUpdate {
            available: Some(false),
            ..Default::default()
        });
        assert!(!item.available);
        assert_eq!(item.name, "Tea");
    }
}
