//! Menu entries as read from the menu collection.
//!
//! The menu is owned by menu management; this crate only reads it to build carts and
//! snapshots items into orders.

use crate::model::OrderItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub available: bool,
}

impl MenuItem {
    /// Copies the current name, price and category into an order line.
    pub fn snapshot(&self, quantity: u32, notes: Option<String>) -> OrderItem {
        OrderItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            quantity,
            notes,
            category: self.category.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub category: String,
}

impl Category {
    /// Category names are compared ignoring case and surrounding whitespace.
    pub fn same_name(&self, name: &str) -> bool {
        self.category.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Whether `name` can be added without clashing with `existing`.
    pub fn is_available_name(name: &str, existing: &[Category]) -> bool {
        !name.trim().is_empty() && !existing.iter().any(|c| c.same_name(name))
    }
}

/// Available menu items grouped into sections, in category-list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuBoard {
    pub sections: Vec<MenuSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub category: String,
    pub items: Vec<MenuItem>,
}

impl MenuBoard {
    /// Unavailable items are left out, as are empty sections. Items whose category is
    /// not in the list get a section of their own after the listed ones.
    pub fn new(categories: &[Category], items: &[MenuItem]) -> Self {
        let mut sections: Vec<MenuSection> = categories
            .iter()
            .map(|c| MenuSection {
                category: c.category.clone(),
                items: Vec::new(),
            })
            .collect();

        for item in items.iter().filter(|i| i.available) {
            let index = categories
                .iter()
                .position(|c| c.same_name(&item.category))
                .or_else(|| {
                    sections
                        .iter()
                        .skip(categories.len())
                        .position(|s| s.category == item.category)
                        .map(|offset| categories.len() + offset)
                });
            match index {
                Some(index) => sections[index].items.push(item.clone()),
                None => sections.push(MenuSection {
                    category: item.category.clone(),
                    items: vec![item.clone()],
                }),
            }
        }

        sections.retain(|s| !s.items.is_empty());
        Self { sections }
    }

    pub fn find(&self, menu_item_id: &str) -> Option<&MenuItem> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|i| i.id == menu_item_id)
    }
}
