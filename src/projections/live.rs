//! # Live Dashboard
//!
//! A background task that subscribes to the three collections and re-derives one
//! role's view after every commit. Readers get the latest view from a `watch` channel,
//! so a slow screen only ever skips intermediate states.

use super::{KitchenBoard, ReceptionView, WaiterView};
use crate::clients::{BillClient, OrderClient, TableClient};
use crate::model::{Bill, Order, StaffIdentity, StaffRole, Table};
use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Waiter(WaiterView),
    Kitchen(KitchenBoard),
    Reception(ReceptionView),
}

struct Inputs {
    tables: Vec<Table>,
    orders: Vec<Order>,
    bills: Vec<Bill>,
}

impl Inputs {
    fn render(&self, role: StaffRole, recent: usize) -> DashboardView {
        let now = Utc::now();
        match role {
            StaffRole::Waiter => {
                DashboardView::Waiter(WaiterView::build(&self.tables, &self.orders, now))
            }
            StaffRole::Chef => {
                DashboardView::Kitchen(KitchenBoard::build(&self.orders, &self.tables))
            }
            StaffRole::Reception => DashboardView::Reception(ReceptionView::build(
                &self.tables,
                &self.orders,
                &self.bills,
                recent,
                now,
            )),
        }
    }
}

/// A role's dashboard, kept current until dropped.
pub struct LiveDashboard {
    view: watch::Receiver<DashboardView>,
    task: JoinHandle<()>,
}

impl LiveDashboard {
    /// Starts the refresh task. `recent` is the length of reception's recent-orders list.
    pub fn spawn(
        identity: &StaffIdentity,
        tables: &TableClient,
        orders: &OrderClient,
        bills: &BillClient,
        recent: usize,
    ) -> Self {
        let role = identity.role;
        let mut table_updates = tables.subscribe(|_| true);
        let mut order_updates = orders.subscribe(|_| true);
        let mut bill_updates = bills.subscribe(|_| true);
        let mut inputs = Inputs {
            tables: table_updates.current(),
            orders: order_updates.current(),
            bills: bill_updates.current(),
        };
        let (sender, view) = watch::channel(inputs.render(role, recent));
        info!(uid = %identity.uid, ?role, "Dashboard started");

        let task = tokio::spawn(async move {
            loop {
                let update = tokio::select! {
                    changed = table_updates.changed() => changed.map(|t| inputs.tables = t),
                    changed = order_updates.changed() => changed.map(|o| inputs.orders = o),
                    changed = bill_updates.changed() => changed.map(|b| inputs.bills = b),
                };
                if update.is_err() {
                    debug!("Collection closed, stopping dashboard");
                    break;
                }
                if sender.send(inputs.render(role, recent)).is_err() {
                    debug!("No dashboard readers left");
                    break;
                }
            }
        });

        Self { view, task }
    }

    pub fn current(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    /// Waits for the next refresh. `None` once the dashboard has stopped.
    pub async fn changed(&mut self) -> Option<DashboardView> {
        self.view.changed().await.ok()?;
        Some(self.view.borrow_and_update().clone())
    }
}

impl Drop for LiveDashboard {
    fn drop(&mut self) {
        self.task.abort();
    }
}
