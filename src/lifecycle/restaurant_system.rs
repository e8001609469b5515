use crate::billing::BillingEngine;
use crate::clients::{BillClient, OrderClient, TableClient};
use crate::config::EngineConfig;
use crate::model::StaffIdentity;
use crate::projections::LiveDashboard;
use crate::settings::TaxSettings;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running engine: one actor per collection plus the billing engine.
///
/// # Architecture
///
/// - **Table actor**: occupancy state machine and session ids (`Context = ()`)
/// - **Order actor**: orders bound to a session, checked against the live table
///   (`Context = TableClient`)
/// - **Bill actor**: append-only bills, one per session (`Context = ()`)
///
/// # Example
///
/// ```ignore
/// let system = RestaurantSystem::new(&EngineConfig::default(), Arc::new(FixedTaxRate(gst)));
///
/// let table = system.tables.occupy(&table, guest, "waiter_1").await?;
/// let order_id = system.orders.submit(&table, items, None, Some("waiter_1".into())).await?;
/// let bill = system.billing.settle_table(table.id, PaymentMethod::Cash).await?;
///
/// system.shutdown().await?;
/// ```
pub struct RestaurantSystem {
    pub tables: TableClient,
    pub orders: OrderClient,
    pub bills: BillClient,
    pub billing: BillingEngine,
    recent_orders: usize,
    handles: Vec<JoinHandle<()>>,
}

impl RestaurantSystem {
    /// Spawns every actor and wires the dependencies. Must be called inside a Tokio
    /// runtime.
    pub fn new(config: &EngineConfig, tax_settings: Arc<dyn TaxSettings>) -> Self {
        let (table_actor, tables) = crate::table_actor::new(config.channel_buffer);
        let (order_actor, orders) = crate::order_actor::new(config.channel_buffer);
        let (bill_actor, bills) = crate::bill_actor::new(config.channel_buffer);

        let table_handle = tokio::spawn(table_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(tables.clone()));
        let bill_handle = tokio::spawn(bill_actor.run(()));

        let billing = BillingEngine::new(
            tables.clone(),
            orders.clone(),
            bills.clone(),
            tax_settings,
            config.default_gst_rate,
        );
        info!(buffer = config.channel_buffer, "Restaurant system started");

        Self {
            tables,
            orders,
            bills,
            billing,
            recent_orders: config.recent_orders,
            handles: vec![table_handle, order_handle, bill_handle],
        }
    }

    /// A live dashboard for the signed-in staff member's role.
    pub fn dashboard(&self, identity: &StaffIdentity) -> LiveDashboard {
        LiveDashboard::spawn(
            identity,
            &self.tables,
            &self.orders,
            &self.bills,
            self.recent_orders,
        )
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the request channels; each actor drains what is
    /// queued and exits. The order actor holds a table client of its own, so the table
    /// actor stops only after the order actor has. Client clones handed out elsewhere
    /// keep their actor alive until they are dropped too; live dashboards only hold
    /// subscriptions and stop on their own.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down restaurant system...");

        drop(self.billing);
        drop(self.orders);
        drop(self.bills);
        drop(self.tables);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Restaurant system shutdown complete.");
        Ok(())
    }
}
