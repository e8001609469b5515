//! # Order Client
//!
//! High-level API for the `Order` actor. Session binding is checked twice: here,
//! against the caller's view of the table, and in `Order::on_create`, against the live
//! table.
use crate::model::{Order, OrderCreate, OrderEntry, OrderId, OrderItem, OrderStatus, Table, TableId};
use crate::order_actor::{queries, OrderAction, OrderError};
use crate::session::SessionId;
use async_trait::async_trait;
use chrono::Utc;
use resource_store::{ActorClient, FrameworkError, ResourceClient, Subscription};
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Conflict { id, .. } => OrderError::Conflict(id),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places a kitchen order for the party currently seated at `table`.
    #[instrument(skip(self, table, items), fields(table_number = table.number))]
    pub async fn submit(
        &self,
        table: &Table,
        items: Vec<OrderItem>,
        notes: Option<String>,
        waiter_id: Option<String>,
    ) -> Result<OrderId, OrderError> {
        debug!(?items, "submit called");
        self.place(table, items, notes, waiter_id, OrderEntry::Kitchen)
            .await
    }

    /// Records a charge that skips the kitchen (reception's direct entry).
    #[instrument(skip(self, table, items), fields(table_number = table.number))]
    pub async fn submit_served(
        &self,
        table: &Table,
        items: Vec<OrderItem>,
        notes: Option<String>,
    ) -> Result<OrderId, OrderError> {
        debug!(?items, "submit_served called");
        self.place(table, items, notes, None, OrderEntry::DirectServed)
            .await
    }

    async fn place(
        &self,
        table: &Table,
        items: Vec<OrderItem>,
        notes: Option<String>,
        waiter_id: Option<String>,
        entry: OrderEntry,
    ) -> Result<OrderId, OrderError> {
        if items.is_empty() {
            return Err(OrderError::Validation("Order has no items".to_string()));
        }
        let Some(session_id) = table.session_id else {
            warn!("Table has no active session");
            return Err(OrderError::InvalidSession(table.number));
        };
        let params = OrderCreate {
            table_id: table.id,
            table_number: table.number,
            guest_name: table.guest_name.clone().unwrap_or_default(),
            session_id,
            waiter_id,
            items,
            notes: notes.filter(|n| !n.trim().is_empty()),
            entry,
            at: Utc::now(),
        };
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Moves an order one step along the kitchen flow.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId, to: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Advance { to, at: Utc::now() })
            .await
            .map_err(Self::map_error)
    }

    /// Marks an order served regardless of its current status.
    #[instrument(skip(self))]
    pub async fn serve(&self, id: OrderId) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Serve { at: Utc::now() })
            .await
            .map_err(Self::map_error)
    }

    /// The orders of one seating, oldest first.
    #[instrument(skip(self))]
    pub async fn session_orders(
        &self,
        table_id: TableId,
        session: SessionId,
    ) -> Result<Vec<Order>, OrderError> {
        let all = self.list().await?;
        Ok(queries::by_session_and_table(&all, table_id, &session))
    }

    /// Deletes every served order. Returns how many were removed.
    #[instrument(skip(self))]
    pub async fn purge_served_orders(&self) -> Result<usize, OrderError> {
        let served: Vec<OrderId> = self
            .list()
            .await?
            .into_iter()
            .filter(|o| o.status == OrderStatus::Served)
            .map(|o| o.id)
            .collect();
        for id in &served {
            self.delete(*id).await?;
        }
        info!(count = served.len(), "Served orders purged");
        Ok(served.len())
    }

    pub fn subscribe<F>(&self, filter: F) -> Subscription<Order>
    where
        F: Fn(&Order) -> bool + Send + Sync + 'static,
    {
        self.inner.subscribe(filter)
    }
}
