//! [`Document`] implementation for [`Table`].
//!
//! The actor applies requests one at a time, so the `available` check in `Occupy` and
//! the session assignment happen in one step: of two racing occupies, the second sees
//! an occupied table and fails.

use super::actions::TableAction;
use super::error::TableError;
use crate::model::{Table, TableCreate, TableId, TableStatus, TableUpdate};
use crate::session::SessionId;
use async_trait::async_trait;
use resource_store::Document;
use tracing::debug;

#[async_trait]
impl Document for Table {
    type Id = TableId;
    type Create = TableCreate;
    type Update = TableUpdate;
    type Action = TableAction;
    type ActionResult = Table;
    type Context = ();
    type Error = TableError;

    fn from_create_params(id: TableId, params: TableCreate) -> Result<Self, TableError> {
        validate_number(params.number)?;
        validate_capacity(params.capacity)?;
        if params.status == TableStatus::Occupied {
            return Err(TableError::Validation(
                "A new table cannot start occupied".to_string(),
            ));
        }
        Ok(Self {
            id,
            number: params.number,
            capacity: params.capacity,
            status: params.status,
            guest_name: None,
            guest_phone: None,
            occupied_at: None,
            waiter_id: None,
            session_id: None,
            revision: 0,
        })
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.number.to_string())
    }

    /// Admin edit of number, capacity or status.
    ///
    /// Occupancy is never changed here: `occupied` is only reachable through
    /// [`TableAction::Occupy`], and an occupied table only leaves it through
    /// [`TableAction::Release`].
    async fn on_update(&mut self, update: TableUpdate, _ctx: &()) -> Result<(), TableError> {
        if let Some(status) = update.status {
            if status == TableStatus::Occupied && !self.is_occupied() {
                return Err(TableError::Validation(
                    "Use occupy to seat a party".to_string(),
                ));
            }
            if self.is_occupied() && status != TableStatus::Occupied {
                return Err(TableError::Occupied(self.number));
            }
            self.status = status;
        }
        if let Some(number) = update.number {
            validate_number(number)?;
            self.number = number;
        }
        if let Some(capacity) = update.capacity {
            validate_capacity(capacity)?;
            self.capacity = capacity;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), TableError> {
        if self.is_occupied() {
            return Err(TableError::Occupied(self.number));
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: TableAction, _ctx: &()) -> Result<Table, TableError> {
        match action {
            TableAction::Occupy {
                guest,
                waiter_id,
                at,
            } => {
                if self.status != TableStatus::Available {
                    return Err(TableError::NotAvailable {
                        number: self.number,
                        status: self.status,
                    });
                }
                let session = SessionId::begin();
                debug!(table_number = self.number, %session, "Session started");
                self.status = TableStatus::Occupied;
                self.guest_name = Some(guest.name().to_string());
                self.guest_phone = Some(guest.phone().to_string());
                self.occupied_at = Some(at);
                self.waiter_id = Some(waiter_id);
                self.session_id = Some(session);
                Ok(self.clone())
            }
            TableAction::Release { session } => {
                if !self.is_occupied() {
                    return Err(TableError::NotOccupied(self.number));
                }
                if let Some(expected) = session {
                    if !self.holds_session(&expected) {
                        return Err(TableError::SessionMismatch(self.number));
                    }
                }
                self.status = TableStatus::Available;
                self.guest_name = None;
                self.guest_phone = None;
                self.occupied_at = None;
                self.waiter_id = None;
                self.session_id = None;
                Ok(self.clone())
            }
        }
    }
}

fn validate_number(number: u32) -> Result<(), TableError> {
    if number == 0 {
        return Err(TableError::Validation(
            "Table number must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_capacity(capacity: u32) -> Result<(), TableError> {
    if capacity == 0 {
        return Err(TableError::Validation(
            "Capacity must be at least 1".to_string(),
        ));
    }
    Ok(())
}
