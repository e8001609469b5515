//! Read-side filters over an in-memory order set.
//!
//! These are pure functions so every dashboard can re-derive its view from the latest
//! snapshot without touching the actors.

use crate::model::{Order, OrderStatus, Table, TableId};
use crate::session::SessionId;
use rust_decimal::Decimal;

/// Orders in `status`, oldest first.
pub fn by_status(orders: &[Order], status: OrderStatus) -> Vec<Order> {
    let mut matching: Vec<Order> = orders
        .iter()
        .filter(|o| o.status == status)
        .cloned()
        .collect();
    matching.sort_by_key(|o| (o.created_at, o.id.0));
    matching
}

/// The orders of one seating. Matching on the session as well as the table keeps a
/// previous party's orders at the same table out of the result.
pub fn by_session_and_table(orders: &[Order], table_id: TableId, session: &SessionId) -> Vec<Order> {
    let mut matching: Vec<Order> = orders
        .iter()
        .filter(|o| o.belongs_to(table_id, session))
        .cloned()
        .collect();
    matching.sort_by_key(|o| (o.created_at, o.id.0));
    matching
}

/// [`by_status`] restricted to orders whose table still seats the session they were
/// placed under.
pub fn live_by_status(orders: &[Order], tables: &[Table], status: OrderStatus) -> Vec<Order> {
    by_status(orders, status)
        .into_iter()
        .filter(|o| {
            tables
                .iter()
                .any(|t| t.id == o.table_id && t.holds_session(&o.session_id))
        })
        .collect()
}

/// Ready orders whose table is still seating the session they were placed under.
pub fn ready_for_pickup(orders: &[Order], tables: &[Table]) -> Vec<Order> {
    live_by_status(orders, tables, OrderStatus::Ready)
}

/// Σ frozen order totals.
pub fn session_total(orders: &[Order]) -> Decimal {
    orders.iter().map(|o| o.total_amount).sum()
}
