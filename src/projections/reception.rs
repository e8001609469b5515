//! Reception view: who is seated, what they owe, and the day's orders.

use crate::model::{Bill, Order, Table, TableId};
use crate::order_actor::queries;
use crate::projections::waiter::format_occupied;
use crate::session::SessionId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// An occupied table and its running bill.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    pub table_id: TableId,
    pub table_number: u32,
    pub guest_name: String,
    pub guest_phone: String,
    pub session_id: SessionId,
    /// Σ order totals so far, before tax.
    pub running_total: Decimal,
    pub order_count: usize,
    pub occupied_for: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReceptionView {
    /// Sorted by table number.
    pub active: Vec<ActiveSession>,
    /// Newest first.
    pub recent_orders: Vec<Order>,
    /// Orders created since the start of the current UTC day.
    pub todays_orders: usize,
    /// Σ totals of today's orders, before tax.
    pub todays_revenue: Decimal,
    /// Bills paid since the start of the current UTC day.
    pub bills_paid_today: usize,
    /// Σ totals of those bills, tax included.
    pub collected_today: Decimal,
}

impl ReceptionView {
    pub fn build(
        tables: &[Table],
        orders: &[Order],
        bills: &[Bill],
        recent: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let mut active: Vec<ActiveSession> = tables
            .iter()
            .filter_map(|t| {
                let session = t.session_id?;
                let seating = queries::by_session_and_table(orders, t.id, &session);
                Some(ActiveSession {
                    table_id: t.id,
                    table_number: t.number,
                    guest_name: t.guest_name.clone().unwrap_or_default(),
                    guest_phone: t.guest_phone.clone().unwrap_or_default(),
                    session_id: session,
                    running_total: queries::session_total(&seating),
                    order_count: seating.len(),
                    occupied_for: t.occupied_for(now).map(format_occupied),
                })
            })
            .collect();
        active.sort_by_key(|s| s.table_number);

        let mut recent_orders = orders.to_vec();
        recent_orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        recent_orders.truncate(recent);

        let start_of_day = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc())
            .unwrap_or(now);
        let today: Vec<&Order> = orders.iter().filter(|o| o.created_at >= start_of_day).collect();
        let paid_today: Vec<&Bill> = bills
            .iter()
            .filter(|b| b.paid_at.is_some_and(|at| at >= start_of_day))
            .collect();

        Self {
            active,
            recent_orders,
            todays_orders: today.len(),
            todays_revenue: today.iter().map(|o| o.total_amount).sum(),
            bills_paid_today: paid_today.len(),
            collected_today: paid_today.iter().map(|b| b.total).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderItem, OrderStatus, TableStatus};
    use chrono::{Duration, TimeZone};

    fn seated(number: u32, session: SessionId, now: DateTime<Utc>) -> Table {
        Table {
            id: TableId(number),
            number,
            capacity: 2,
            status: TableStatus::Occupied,
            guest_name: Some(format!("Guest {number}")),
            guest_phone: Some("555-0101".into()),
            occupied_at: Some(now - Duration::minutes(20)),
            waiter_id: None,
            session_id: Some(session),
            revision: 2,
        }
    }

    fn order(id: u32, table: u32, session: SessionId, total: i64, at: DateTime<Utc>) -> Order {
        Order {
            id: OrderId(id),
            table_id: TableId(table),
            table_number: table,
            guest_name: format!("Guest {table}"),
            session_id: session,
            waiter_id: None,
            items: vec![OrderItem {
                id: "x".into(),
                name: "X".into(),
                price: Decimal::new(total, 0),
                quantity: 1,
                notes: None,
                category: "Mains".into(),
            }],
            status: OrderStatus::Pending,
            total_amount: Decimal::new(total, 0),
            notes: None,
            created_at: at,
            updated_at: at,
            served_at: None,
            revision: 1,
        }
    }

    #[test]
    fn active_sessions_and_today() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 13, 0, 0).unwrap();
        let (s4, s7, old) = (SessionId::begin(), SessionId::begin(), SessionId::begin());
        let mut free = seated(9, old, now);
        free.status = TableStatus::Available;
        free.session_id = None;
        let tables = vec![seated(7, s7, now), seated(4, s4, now), free];
        let orders = vec![
            order(1, 9, old, 500, now - Duration::days(1)),
            order(2, 4, s4, 120, now - Duration::minutes(15)),
            order(3, 4, s4, 80, now - Duration::minutes(5)),
            order(4, 7, s7, 60, now - Duration::minutes(2)),
        ];

        let view = ReceptionView::build(&tables, &orders, &[], 2, now);

        let numbers: Vec<u32> = view.active.iter().map(|s| s.table_number).collect();
        assert_eq!(numbers, vec![4, 7]);
        assert_eq!(view.active[0].running_total, Decimal::new(200, 0));
        assert_eq!(view.active[0].order_count, 2);
        assert_eq!(view.active[0].occupied_for.as_deref(), Some("20m"));

        let recent: Vec<u32> = view.recent_orders.iter().map(|o| o.id.0).collect();
        assert_eq!(recent, vec![4, 3]);

        assert_eq!(view.todays_orders, 3);
        assert_eq!(view.todays_revenue, Decimal::new(260, 0));
        assert_eq!(view.bills_paid_today, 0);
    }
}
