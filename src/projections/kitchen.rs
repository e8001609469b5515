//! Kitchen board: one column per status the kitchen works on, oldest order first.
//!
//! Only orders whose table still seats the ordering party are shown. Orders left
//! behind by a released session stay queryable through [`queries::by_status`].

use crate::model::{Order, OrderStatus, Table};
use crate::order_actor::queries;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KitchenBoard {
    pub pending: Vec<Order>,
    pub preparing: Vec<Order>,
    pub ready: Vec<Order>,
}

impl KitchenBoard {
    pub fn build(orders: &[Order], tables: &[Table]) -> Self {
        Self {
            pending: queries::live_by_status(orders, tables, OrderStatus::Pending),
            preparing: queries::live_by_status(orders, tables, OrderStatus::Preparing),
            ready: queries::ready_for_pickup(orders, tables),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.preparing.is_empty() && self.ready.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderItem, TableId, TableStatus};
    use crate::session::SessionId;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn order(id: u32, table: u32, session: SessionId, status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: id.into(),
            table_id: TableId(table),
            table_number: table,
            guest_name: "A".into(),
            session_id: session,
            waiter_id: None,
            items: vec![OrderItem {
                id: "dal".into(),
                name: "Dal".into(),
                price: Decimal::new(100, 0),
                quantity: 1,
                notes: None,
                category: "Mains".into(),
            }],
            status,
            total_amount: Decimal::new(100, 0),
            notes: None,
            created_at: now,
            updated_at: now,
            served_at: None,
            revision: 1,
        }
    }

    #[test]
    fn orders_of_released_tables_leave_the_board() {
        let session = SessionId::begin();
        let mut seated = Table {
            id: TableId(3),
            number: 3,
            capacity: 2,
            status: TableStatus::Occupied,
            guest_name: Some("A".into()),
            guest_phone: None,
            occupied_at: Some(Utc::now()),
            waiter_id: None,
            session_id: Some(session),
            revision: 2,
        };
        let orders = vec![
            order(1, 3, session, OrderStatus::Pending),
            order(2, 3, session, OrderStatus::Preparing),
            order(3, 3, session, OrderStatus::Ready),
        ];

        let board = KitchenBoard::build(&orders, std::slice::from_ref(&seated));
        assert_eq!(board.pending.len(), 1);
        assert_eq!(board.preparing.len(), 1);
        assert_eq!(board.ready.len(), 1);

        seated.status = TableStatus::Available;
        seated.session_id = None;
        assert!(KitchenBoard::build(&orders, &[seated]).is_empty());
    }
}
