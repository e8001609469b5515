//! # Table Client
//!
//! High-level API for the `Table` actor: seating and releasing parties, plus the table
//! management operations.
use crate::model::{GuestDetails, Table, TableCreate, TableId, TableUpdate};
use crate::session::SessionId;
use crate::table_actor::{TableAction, TableError};
use async_trait::async_trait;
use chrono::Utc;
use resource_store::{ActorClient, FrameworkError, ResourceClient, Snapshot, Subscription};
use tracing::{debug, info, instrument};

/// Client for interacting with the Table actor.
#[derive(Clone)]
pub struct TableClient {
    inner: ResourceClient<Table>,
}

#[async_trait]
impl ActorClient<Table> for TableClient {
    type Error = TableError;

    fn inner(&self) -> &ResourceClient<Table> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => TableError::NotFound(id),
            FrameworkError::Conflict { id, .. } => TableError::Conflict(id),
            FrameworkError::Duplicate(number) => TableError::DuplicateNumber(number),
            other => other
                .downcast_entity::<TableError>()
                .unwrap_or_else(|e| TableError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl TableClient {
    pub fn new(inner: ResourceClient<Table>) -> Self {
        Self { inner }
    }

    /// Seats a party at `table`.
    ///
    /// `table` is the caller's last read: if the table changed since (another waiter
    /// seated someone, an admin edited it) the call fails with
    /// [`TableError::Conflict`] and nothing is written. Returns the occupied table
    /// carrying its new session id.
    #[instrument(skip(self, table, guest), fields(table_number = table.number))]
    pub async fn occupy(
        &self,
        table: &Table,
        guest: GuestDetails,
        waiter_id: &str,
    ) -> Result<Table, TableError> {
        debug!(?guest, "occupy called");
        let action = TableAction::Occupy {
            guest,
            waiter_id: waiter_id.to_string(),
            at: Utc::now(),
        };
        let seated = self
            .inner
            .perform_action_if(table.id, action, table.revision)
            .await
            .map_err(Self::map_error)?;
        info!(session = ?seated.session_id, "Table occupied");
        Ok(seated)
    }

    /// Releases the table if it is still seating `session`.
    #[instrument(skip(self))]
    pub async fn release_session(
        &self,
        table_id: TableId,
        session: SessionId,
    ) -> Result<Table, TableError> {
        debug!("Sending request");
        let released = self
            .inner
            .perform_action(table_id, TableAction::Release { session: Some(session) })
            .await
            .map_err(Self::map_error)?;
        info!("Table released");
        Ok(released)
    }

    /// Releases the table whoever is seated. Settlement uses [`Self::release_session`];
    /// this is the administrative override.
    #[instrument(skip(self))]
    pub async fn release(&self, table_id: TableId) -> Result<Table, TableError> {
        debug!("Sending request");
        let released = self
            .inner
            .perform_action(table_id, TableAction::Release { session: None })
            .await
            .map_err(Self::map_error)?;
        info!("Table released by override");
        Ok(released)
    }

    #[instrument(skip(self))]
    pub async fn create_table(&self, params: TableCreate) -> Result<TableId, TableError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_table(&self, id: TableId, update: TableUpdate) -> Result<Table, TableError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Removes a table. Refused while it is occupied.
    #[instrument(skip(self))]
    pub async fn delete_table(&self, id: TableId) -> Result<(), TableError> {
        self.delete(id).await?;
        info!("Table deleted");
        Ok(())
    }

    /// The floor as last published, sorted by table number.
    pub fn floor(&self) -> Vec<Table> {
        let snapshot: Snapshot<Table> = self.inner.snapshot();
        let mut tables: Vec<Table> = snapshot.iter().cloned().collect();
        tables.sort_by_key(|t| t.number);
        tables
    }

    pub fn subscribe<F>(&self, filter: F) -> Subscription<Table>
    where
        F: Fn(&Table) -> bool + Send + Sync + 'static,
    {
        self.inner.subscribe(filter)
    }
}
