//! Food orders and the item snapshots they carry.
//!
//! An order is bound to exactly one session at creation and never moves. Its items
//! are copies of the menu entries at order time, so later menu edits leave historical
//! orders and bills untouched.

use crate::model::TableId;
use crate::session::SessionId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Served,
}

impl OrderStatus {
    /// The only status this one may advance to.
    pub fn successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Menu item as it was when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Menu item reference.
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub notes: Option<String>,
    pub category: String,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Σ price × quantity.
pub fn items_total(items: &[OrderItem]) -> Decimal {
    items.iter().map(OrderItem::line_total).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub table_id: TableId,
    pub table_number: u32,
    pub guest_name: String,
    pub session_id: SessionId,
    pub waiter_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Frozen at submission.
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub served_at: Option<DateTime<Utc>>,
    pub revision: u64,
}

impl Order {
    pub fn belongs_to(&self, table_id: TableId, session: &SessionId) -> bool {
        self.table_id == table_id && &self.session_id == session
    }
}

/// How an order enters the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEntry {
    /// Waiter order routed through the kitchen, starts `pending`.
    Kitchen,
    /// Reception charge that skips the kitchen, starts `served`.
    DirectServed,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub table_id: TableId,
    pub table_number: u32,
    pub guest_name: String,
    pub session_id: SessionId,
    pub waiter_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,
    pub entry: OrderEntry,
    pub at: DateTime<Utc>,
}

/// Orders have no free-form edits; status changes go through actions.
#[derive(Debug)]
pub enum OrderUpdate {}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: i64, quantity: u32) -> OrderItem {
        OrderItem {
            id: format!("dish_{price}"),
            name: "Paneer Tikka".to_string(),
            price: Decimal::new(price, 0),
            quantity,
            notes: None,
            category: "Starters".to_string(),
        }
    }

    #[test]
    fn total_is_sum_of_lines() {
        let items = vec![item(120, 2), item(80, 1)];
        assert_eq!(items_total(&items), Decimal::new(320, 0));
        assert_eq!(items_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn money_keeps_its_exact_decimal_on_the_wire() {
        let mut line = item(0, 1);
        line.price = Decimal::new(1999, 2);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["price"], "19.99");
        let back: OrderItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn status_chain_is_linear() {
        assert_eq!(OrderStatus::Pending.successor(), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::Ready.successor(), Some(OrderStatus::Served));
        assert_eq!(OrderStatus::Served.successor(), None);
        assert_eq!(serde_json::to_string(&OrderStatus::Preparing).unwrap(), "\"preparing\"");
    }
}
