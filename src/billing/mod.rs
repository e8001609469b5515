//! # Billing & Settlement
//!
//! [`compute_bill`] turns a session's orders into a [`BillDraft`]. [`BillingEngine`]
//! closes the session out:
//!
//! 1. record the bill (issued paid),
//! 2. release the table,
//! 3. serve every order of the session that is not served yet.
//!
//! The three writes go to three different actors and are not atomic. Before step 1
//! the engine checks that no other settlement of the table is running, that the
//! caller's view of the table and of its orders is current, and the bill store
//! accepts one bill per session. The table keeps accepting orders until step 2, so
//! once it is released the session's orders are read again. Any order the bill does
//! not cover is closed as well and reported as [`BillingError::UnbilledOrders`].
//!
//! After step 1 each completed step is recorded in a [`SettlementProgress`]. If a
//! later step fails the caller gets [`BillingError::PartialSettlement`] with that
//! progress, and [`BillingEngine::resume`] finishes the remaining steps. Both are
//! idempotent: an already released session or an already served order counts as done.

pub mod error;

pub use error::*;

use crate::clients::{BillClient, OrderClient, TableClient};
use crate::model::{
    items_total, Bill, BillCreate, BillDraft, Order, OrderId, OrderItem, OrderStatus,
    PaymentMethod, Table, TableId,
};
use crate::order_actor::{queries, OrderError};
use crate::session::SessionId;
use crate::settings::{self, TaxSettings};
use crate::table_actor::TableError;
use chrono::Utc;
use resource_store::ActorClient;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, instrument, warn};

/// Computes the bill for `table`'s current session.
///
/// Subtotal is Σ price × quantity over every item of every order; tax is
/// `subtotal × gst_rate / 100` rounded to 2 places (midpoint away from zero). Pure: the
/// same orders and rate always give the same figures.
pub fn compute_bill(
    table: &Table,
    session_orders: &[Order],
    gst_rate: Decimal,
) -> Result<BillDraft, BillingError> {
    let Some(session_id) = table.session_id else {
        return Err(BillingError::InconsistentState(format!(
            "Table {} has no active session",
            table.number
        )));
    };
    if session_orders.is_empty() {
        return Err(BillingError::NothingToBill(table.number));
    }
    if let Some(stray) = session_orders
        .iter()
        .find(|o| !o.belongs_to(table.id, &session_id))
    {
        return Err(BillingError::InconsistentState(format!(
            "{} does not belong to the current session of table {}",
            stray.id, table.number
        )));
    }

    let items: Vec<OrderItem> = session_orders
        .iter()
        .flat_map(|o| o.items.iter().cloned())
        .collect();
    let subtotal = items_total(&items);
    if subtotal.is_zero() {
        return Err(BillingError::NothingToBill(table.number));
    }
    let tax = (subtotal * gst_rate / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(BillDraft {
        table_id: table.id,
        table_number: table.number,
        guest_name: table.guest_name.clone().unwrap_or_default(),
        session_id,
        orders: session_orders.iter().map(|o| o.id).collect(),
        items,
        subtotal,
        tax_rate: gst_rate,
        tax,
        total: subtotal + tax,
    })
}

/// What a settlement has done so far, once its bill is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementProgress {
    pub bill: Bill,
    pub table_id: TableId,
    pub table_number: u32,
    pub session_id: SessionId,
    pub table_released: bool,
    /// Orders still to be marked served.
    pub orders_to_serve: Vec<OrderId>,
    /// Orders of the session found after the release that the bill does not cover.
    pub unbilled: Vec<OrderId>,
    /// Why the last attempt stopped.
    pub failure: Option<String>,
}

impl SettlementProgress {
    pub fn is_complete(&self) -> bool {
        self.table_released && self.orders_to_serve.is_empty()
    }
}

impl fmt::Display for SettlementProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} for table {} is paid but settlement is incomplete (table released: {}, orders left to serve: {})",
            self.bill.id,
            self.table_number,
            self.table_released,
            self.orders_to_serve.len()
        )?;
        if let Some(failure) = &self.failure {
            write!(f, ": {failure}")?;
        }
        Ok(())
    }
}

type InFlight = Arc<Mutex<HashSet<TableId>>>;

/// Marks a table as being settled until dropped.
struct SettleGuard {
    in_flight: InFlight,
    table_id: TableId,
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.table_id);
    }
}

/// The only component that writes to more than one collection.
#[derive(Clone)]
pub struct BillingEngine {
    tables: TableClient,
    orders: OrderClient,
    bills: BillClient,
    settings: Arc<dyn TaxSettings>,
    default_gst_rate: Decimal,
    in_flight: InFlight,
}

impl BillingEngine {
    pub fn new(
        tables: TableClient,
        orders: OrderClient,
        bills: BillClient,
        settings: Arc<dyn TaxSettings>,
        default_gst_rate: Decimal,
    ) -> Self {
        Self {
            tables,
            orders,
            bills,
            settings,
            default_gst_rate,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    fn claim(&self, table_id: TableId, number: u32) -> Result<SettleGuard, BillingError> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(table_id) {
            warn!(table_number = number, "Settlement already in flight");
            return Err(BillingError::SettleInProgress(number));
        }
        Ok(SettleGuard {
            in_flight: Arc::clone(&self.in_flight),
            table_id,
        })
    }

    /// The GST rate in effect, falling back to the configured default.
    pub async fn gst_rate(&self) -> Decimal {
        settings::gst_rate_or(self.settings.as_ref(), self.default_gst_rate).await
    }

    /// Bills `table`'s current session and resets the table and its orders.
    ///
    /// `table` and `session_orders` are the caller's view. If the table was modified
    /// since it was read, or orders were added to or removed from the session, nothing
    /// is written and [`BillingError::Conflict`] is returned.
    #[instrument(skip_all, fields(table_number = table.number))]
    pub async fn settle(
        &self,
        table: &Table,
        session_orders: &[Order],
        payment_method: PaymentMethod,
    ) -> Result<Bill, BillingError> {
        let _guard = self.claim(table.id, table.number)?;

        let gst_rate = self.gst_rate().await;
        let draft = compute_bill(table, session_orders, gst_rate)?;
        self.check_current(table, &draft).await?;

        let orders_to_serve = session_orders
            .iter()
            .filter(|o| o.status != OrderStatus::Served)
            .map(|o| o.id)
            .collect();
        let session_id = draft.session_id;
        let bill = self
            .bills
            .record(BillCreate {
                draft,
                payment_method,
                at: Utc::now(),
            })
            .await?;
        info!(bill_id = %bill.id, total = %bill.total, "Bill paid");

        self.finish(SettlementProgress {
            bill,
            table_id: table.id,
            table_number: table.number,
            session_id,
            table_released: false,
            orders_to_serve,
            unbilled: Vec::new(),
            failure: None,
        })
        .await
    }

    /// Reads the table and its current session orders, then settles them.
    #[instrument(skip(self))]
    pub async fn settle_table(
        &self,
        table_id: TableId,
        payment_method: PaymentMethod,
    ) -> Result<Bill, BillingError> {
        let table = self.live_table(table_id).await?;
        let Some(session) = table.session_id else {
            return Err(BillingError::InconsistentState(format!(
                "Table {} has no active session",
                table.number
            )));
        };
        let orders = self.orders.session_orders(table.id, session).await?;
        self.settle(&table, &orders, payment_method).await
    }

    /// Completes a settlement that stopped after its bill was recorded.
    #[instrument(skip_all, fields(bill_id = %progress.bill.id))]
    pub async fn resume(&self, progress: SettlementProgress) -> Result<Bill, BillingError> {
        let _guard = self.claim(progress.table_id, progress.table_number)?;
        info!(
            table_released = progress.table_released,
            orders_left = progress.orders_to_serve.len(),
            "Resuming settlement"
        );
        self.finish(progress).await
    }

    /// Releases an occupied table whose session owes nothing, without writing a bill.
    ///
    /// Every order of the session is marked served, including any submitted while the
    /// table was being freed; those come back as [`BillingError::UnbilledOrders`]. The
    /// release is logged on the `audit` target, and so is a failure to close the orders
    /// once the table is already released.
    #[instrument(skip(self))]
    pub async fn free_table(&self, table_id: TableId) -> Result<Table, BillingError> {
        let table = self.live_table(table_id).await?;
        let Some(session) = table.session_id else {
            return Err(BillingError::Validation(format!(
                "Table {} is not occupied",
                table.number
            )));
        };
        let _guard = self.claim(table.id, table.number)?;

        let orders = self.orders.session_orders(table.id, session).await?;
        let total = queries::session_total(&orders);
        if !total.is_zero() {
            warn!(%total, "Refusing to free a table with an outstanding balance");
            return Err(BillingError::OutstandingBalance {
                number: table.number,
                total,
            });
        }

        let released = self.tables.release_session(table.id, session).await?;
        info!(
            target: "audit",
            table_number = table.number,
            session_id = %session,
            orders = orders.len(),
            "Table freed without a bill"
        );

        let known: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
        let late = match self.close_session_orders(table.id, session).await {
            Ok(closed) => closed
                .into_iter()
                .filter(|id| !known.contains(id))
                .collect::<Vec<_>>(),
            Err((orders_left, failure)) => {
                warn!(
                    target: "audit",
                    table_number = table.number,
                    session_id = %session,
                    ?orders_left,
                    %failure,
                    "Table freed but its orders were not closed"
                );
                return Err(failure.into());
            }
        };
        if !late.is_empty() {
            return Err(unbilled(table.number, session, late));
        }
        Ok(released)
    }

    /// Serves every unserved order of a released session. Returns the ids of all the
    /// session's orders, or the orders still open and the error that stopped it.
    async fn close_session_orders(
        &self,
        table_id: TableId,
        session: SessionId,
    ) -> Result<Vec<OrderId>, (Vec<OrderId>, OrderError)> {
        let orders = self
            .orders
            .session_orders(table_id, session)
            .await
            .map_err(|e| (Vec::new(), e))?;
        let mut open: Vec<OrderId> = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Served)
            .map(|o| o.id)
            .collect();
        while let Some(&order_id) = open.first() {
            match self.orders.serve(order_id).await {
                Ok(_) | Err(OrderError::NotFound(_)) => {
                    open.remove(0);
                }
                Err(e) => return Err((open, e)),
            }
        }
        Ok(orders.iter().map(|o| o.id).collect())
    }

    async fn live_table(&self, table_id: TableId) -> Result<Table, BillingError> {
        self.tables.get(table_id).await?.ok_or_else(|| {
            BillingError::InconsistentState(format!("{table_id} does not exist"))
        })
    }

    /// Fails unless the stored table and session orders still match what the caller
    /// billed.
    async fn check_current(&self, table: &Table, draft: &BillDraft) -> Result<(), BillingError> {
        let live = self.live_table(table.id).await?;
        if live.revision != table.revision {
            warn!(
                seen = table.revision,
                stored = live.revision,
                "Table changed before settlement"
            );
            return Err(BillingError::Conflict(format!(
                "Table {} was modified concurrently, reload and retry",
                table.number
            )));
        }

        let mut billed: Vec<u32> = draft.orders.iter().map(|id| id.0).collect();
        let mut stored: Vec<u32> = self
            .orders
            .session_orders(table.id, draft.session_id)
            .await?
            .iter()
            .map(|o| o.id.0)
            .collect();
        billed.sort_unstable();
        stored.sort_unstable();
        if billed != stored {
            warn!(?billed, ?stored, "Session orders changed before settlement");
            return Err(BillingError::Conflict(format!(
                "Orders for table {} changed, reload and retry",
                table.number
            )));
        }
        Ok(())
    }

    async fn finish(&self, mut progress: SettlementProgress) -> Result<Bill, BillingError> {
        if !progress.table_released {
            match self
                .tables
                .release_session(progress.table_id, progress.session_id)
                .await
            {
                Ok(_) | Err(TableError::NotOccupied(_)) | Err(TableError::SessionMismatch(_)) => {
                    progress.table_released = true;
                }
                Err(e) => return Err(incomplete(progress, e.to_string())),
            }
        }

        // With the table released no new order can join the session.
        match self
            .orders
            .session_orders(progress.table_id, progress.session_id)
            .await
        {
            Ok(orders) => {
                for order in orders {
                    if progress.bill.orders.contains(&order.id)
                        || progress.unbilled.contains(&order.id)
                    {
                        continue;
                    }
                    progress.unbilled.push(order.id);
                    if order.status != OrderStatus::Served {
                        progress.orders_to_serve.push(order.id);
                    }
                }
            }
            Err(e) => return Err(incomplete(progress, e.to_string())),
        }

        while let Some(&order_id) = progress.orders_to_serve.first() {
            match self.orders.serve(order_id).await {
                Ok(_) | Err(OrderError::NotFound(_)) => {
                    progress.orders_to_serve.remove(0);
                }
                Err(e) => return Err(incomplete(progress, e.to_string())),
            }
        }

        if !progress.unbilled.is_empty() {
            return Err(unbilled(
                progress.table_number,
                progress.session_id,
                progress.unbilled,
            ));
        }
        info!(bill_id = %progress.bill.id, "Settlement complete");
        Ok(progress.bill)
    }
}

fn unbilled(table_number: u32, session: SessionId, orders: Vec<OrderId>) -> BillingError {
    warn!(
        target: "audit",
        table_number,
        session_id = %session,
        ?orders,
        "Orders placed while the session was closing were served without a bill"
    );
    BillingError::UnbilledOrders {
        table_number,
        orders,
    }
}

fn incomplete(mut progress: SettlementProgress, failure: String) -> BillingError {
    warn!(
        target: "audit",
        bill_id = %progress.bill.id,
        table_number = progress.table_number,
        session_id = %progress.session_id,
        table_released = progress.table_released,
        orders_left = progress.orders_to_serve.len(),
        %failure,
        "Settlement stopped after the bill was recorded"
    );
    progress.failure = Some(failure);
    BillingError::PartialSettlement(Box::new(progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableStatus;
    use chrono::Utc;

    fn seated(session: SessionId) -> Table {
        Table {
            id: TableId(5),
            number: 5,
            capacity: 4,
            status: TableStatus::Occupied,
            guest_name: Some("A".into()),
            guest_phone: Some("555-1111".into()),
            occupied_at: Some(Utc::now()),
            waiter_id: Some("waiter_1".into()),
            session_id: Some(session),
            revision: 2,
        }
    }

    fn item(price: i64, quantity: u32) -> OrderItem {
        OrderItem {
            id: format!("item_{price}"),
            name: format!("Dish {price}"),
            price: Decimal::new(price, 0),
            quantity,
            notes: None,
            category: "Mains".into(),
        }
    }

    fn order(id: u32, session: SessionId, items: Vec<OrderItem>) -> Order {
        let now = Utc::now();
        Order {
            id: OrderId(id),
            table_id: TableId(5),
            table_number: 5,
            guest_name: "A".into(),
            session_id: session,
            waiter_id: None,
            total_amount: items_total(&items),
            items,
            status: OrderStatus::Ready,
            notes: None,
            created_at: now,
            updated_at: now,
            served_at: None,
            revision: 1,
        }
    }

    #[test]
    fn gst_is_applied_to_the_subtotal() {
        let session = SessionId::begin();
        let orders = vec![order(1, session, vec![item(120, 2), item(80, 1)])];

        let draft = compute_bill(&seated(session), &orders, Decimal::new(18, 0)).unwrap();
        assert_eq!(draft.subtotal, Decimal::new(320, 0));
        assert_eq!(draft.tax, Decimal::new(576, 1));
        assert_eq!(draft.total, Decimal::new(3776, 1));
        assert_eq!(draft.orders, vec![OrderId(1)]);
        assert_eq!(draft.items.len(), 2);

        // Same input, same figures.
        assert_eq!(
            compute_bill(&seated(session), &orders, Decimal::new(18, 0)).unwrap(),
            draft
        );
    }

    #[test]
    fn tax_rounds_half_away_from_zero() {
        let session = SessionId::begin();
        // 0.30 * 5% = 0.015
        let mut cheap = item(0, 1);
        cheap.price = Decimal::new(30, 2);
        let orders = vec![order(1, session, vec![cheap])];
        let draft = compute_bill(&seated(session), &orders, Decimal::new(5, 0)).unwrap();
        assert_eq!(draft.tax, Decimal::new(2, 2));
    }

    #[test]
    fn nothing_to_bill() {
        let session = SessionId::begin();
        assert_eq!(
            compute_bill(&seated(session), &[], Decimal::new(5, 0)),
            Err(BillingError::NothingToBill(5))
        );
        let free = vec![order(1, session, vec![item(0, 3)])];
        assert_eq!(
            compute_bill(&seated(session), &free, Decimal::new(5, 0)),
            Err(BillingError::NothingToBill(5))
        );
    }

    #[test]
    fn orders_of_another_session_are_rejected() {
        let session = SessionId::begin();
        let stale = vec![order(1, SessionId::begin(), vec![item(100, 1)])];
        assert!(matches!(
            compute_bill(&seated(session), &stale, Decimal::new(5, 0)),
            Err(BillingError::InconsistentState(_))
        ));

        let mut released = seated(session);
        released.session_id = None;
        assert!(matches!(
            compute_bill(&released, &[], Decimal::new(5, 0)),
            Err(BillingError::InconsistentState(_))
        ));
    }
}
