//! Waiter view: the floor plan and orders ready to carry out.

use crate::model::{Order, OrderStatus, Table};
use crate::order_actor::queries;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct TableCard {
    pub table: Table,
    /// `"1h 5m"` / `"12m"` while occupied.
    pub occupied_for: Option<String>,
    /// Orders of the current session not served yet.
    pub open_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaiterView {
    pub floor: Vec<TableCard>,
    pub ready_for_pickup: Vec<Order>,
}

impl WaiterView {
    pub fn build(tables: &[Table], orders: &[Order], now: DateTime<Utc>) -> Self {
        let floor = floor(tables)
            .into_iter()
            .map(|table| {
                let open_orders = table.session_id.map_or(0, |session| {
                    queries::by_session_and_table(orders, table.id, &session)
                        .iter()
                        .filter(|o| o.status != OrderStatus::Served)
                        .count()
                });
                TableCard {
                    occupied_for: table.occupied_for(now).map(format_occupied),
                    open_orders,
                    table,
                }
            })
            .collect();
        Self {
            floor,
            ready_for_pickup: queries::ready_for_pickup(orders, tables),
        }
    }
}

/// All tables sorted by number.
pub fn floor(tables: &[Table]) -> Vec<Table> {
    let mut sorted = tables.to_vec();
    sorted.sort_by_key(|t| t.number);
    sorted
}

/// Tables whose number contains `query`, whose guest name contains it
/// (case-insensitive), or whose status is it. An empty query matches everything.
pub fn search(tables: &[Table], query: &str) -> Vec<Table> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return floor(tables);
    }
    floor(tables)
        .into_iter()
        .filter(|t| {
            t.number.to_string().contains(&query)
                || t
                    .guest_name
                    .as_ref()
                    .is_some_and(|name| name.to_lowercase().contains(&query))
                || t.status.as_str() == query
        })
        .collect()
}

pub fn format_occupied(elapsed: Duration) -> String {
    let minutes = elapsed.num_minutes().max(0);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
