//! The order being assembled before submission.

use crate::model::{items_total, MenuItem, OrderItem};
use crate::order_actor::OrderError;
use rust_decimal::Decimal;

/// Lines keyed by menu item id, in the order they were first added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<OrderItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one of `item`, or bumps the quantity if it is already in the cart.
    pub fn add(&mut self, item: &MenuItem) -> Result<(), OrderError> {
        if !item.available {
            return Err(OrderError::Validation(format!(
                "{} is not available",
                item.name
            )));
        }
        match self.lines.iter_mut().find(|l| l.id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(item.snapshot(1, None)),
        }
        Ok(())
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(menu_item_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.id == menu_item_id) {
            line.quantity = quantity;
        }
    }

    pub fn set_notes(&mut self, menu_item_id: &str, notes: Option<String>) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == menu_item_id) {
            line.notes = notes.filter(|n| !n.trim().is_empty());
        }
    }

    pub fn remove(&mut self, menu_item_id: &str) {
        self.lines.retain(|l| l.id != menu_item_id);
    }

    pub fn lines(&self) -> &[OrderItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Decimal {
        items_total(&self.lines)
    }

    pub fn into_items(self) -> Vec<OrderItem> {
        self.lines
    }
}
