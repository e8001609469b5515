//! [`Document`] implementation for [`Order`].
//!
//! The actor's context is the [`TableClient`]: before an order is stored, `on_create`
//! reads the live table and checks it is still seating the order's session.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::clients::TableClient;
use crate::model::{items_total, Order, OrderCreate, OrderEntry, OrderId, OrderStatus, OrderUpdate};
use crate::table_actor::TableError;
use async_trait::async_trait;
use resource_store::{ActorClient, Document};
use rust_decimal::Decimal;
use tracing::{debug, warn};

#[async_trait]
impl Document for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = TableClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::Validation("Order has no items".to_string()));
        }
        if let Some(line) = params.items.iter().find(|i| i.quantity == 0) {
            return Err(OrderError::Validation(format!(
                "Quantity of {} must be at least 1",
                line.name
            )));
        }
        if let Some(line) = params.items.iter().find(|i| i.price < Decimal::ZERO) {
            return Err(OrderError::Validation(format!(
                "Price of {} must not be negative",
                line.name
            )));
        }

        let total_amount = items_total(&params.items);
        let (status, served_at) = match params.entry {
            OrderEntry::Kitchen => (OrderStatus::Pending, None),
            OrderEntry::DirectServed => (OrderStatus::Served, Some(params.at)),
        };
        Ok(Self {
            id,
            table_id: params.table_id,
            table_number: params.table_number,
            guest_name: params.guest_name,
            session_id: params.session_id,
            waiter_id: params.waiter_id,
            items: params.items,
            status,
            total_amount,
            notes: params.notes,
            created_at: params.at,
            updated_at: params.at,
            served_at,
            revision: 0,
        })
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    async fn on_create(&mut self, tables: &TableClient) -> Result<(), OrderError> {
        let table = tables.get(self.table_id).await.map_err(|e| match e {
            TableError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            _ => OrderError::InvalidSession(self.table_number),
        })?;
        match table {
            Some(table) if table.holds_session(&self.session_id) => {
                debug!(table_number = table.number, session = %self.session_id, "Session verified");
                Ok(())
            }
            _ => {
                warn!(table_number = self.table_number, session = %self.session_id, "Stale session");
                Err(OrderError::InvalidSession(self.table_number))
            }
        }
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &TableClient) -> Result<(), OrderError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &TableClient,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::Advance { to, at } => {
                if to == self.status {
                    return Ok(self.clone());
                }
                if self.status.successor() != Some(to) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to,
                    });
                }
                self.status = to;
                self.updated_at = at;
                if to == OrderStatus::Served {
                    self.served_at = Some(at);
                }
                Ok(self.clone())
            }
            OrderAction::Serve { at } => {
                if self.status != OrderStatus::Served {
                    self.status = OrderStatus::Served;
                    self.updated_at = at;
                    self.served_at = Some(at);
                }
                Ok(self.clone())
            }
        }
    }
}
