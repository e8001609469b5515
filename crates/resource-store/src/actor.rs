//! # Resource Actor
//!
//! The `ResourceActor` owns one collection of documents and processes every request
//! against it sequentially. Because a single task owns the map, no lock is needed and
//! two writes to the same document can never interleave.

use crate::client::ResourceClient;
use crate::entity::Document;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Snapshot};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The server half of a collection.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// The loop ends when every client has been dropped.
///
/// # Operations
///
/// * **Create**: allocates the next id from `next_id`, builds the document, runs
///   `on_create`, checks the unique key and stores it at revision 1.
/// * **Get** / **List**: return clones of the stored documents.
/// * **Update** / **Action**: clone the stored document, check the expected revision,
///   bump the revision on the copy and run the hook against it. The copy replaces
///   the stored document only when the hook succeeds and the unique key still holds.
/// * **Delete**: runs `on_delete`, which may veto, then removes the document.
///
/// Every commit publishes a fresh [`Snapshot`] to subscribers before the caller
/// receives its reply, so a caller that awaits a write and then reads a subscription
/// always observes its own write.
pub struct ResourceActor<T: Document> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
    snapshots: watch::Sender<Snapshot<T>>,
    entity_type: &'static str,
}

impl<T: Document> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` bounds the request channel. When it is full, callers wait.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, snapshot_rx) = watch::channel(Arc::new(Vec::new()));
        // Keep just the type name ("Table" rather than "tableside::model::table::Table").
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            snapshots,
            entity_type,
        };
        let client = ResourceClient::new(sender, snapshot_rx);
        (actor, client)
    }

    /// Runs the event loop until the channel closes.
    ///
    /// `context` is handed to every document hook. It is supplied here rather than in
    /// `new` so that actors depending on each other can all be constructed first.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    expected_revision,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, ?expected_revision, "Update");
                    let result = self.update(id, update, expected_revision, &context).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(id, &context).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    expected_revision,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, ?expected_revision, "Action");
                    let result = self.action(id, action, expected_revision, &context).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let entity_type = self.entity_type;
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        item.set_revision(1);
        self.commit(id.clone(), item)?;
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        expected_revision: Option<u64>,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let entity_type = self.entity_type;
        let mut draft = self.draft(&id, expected_revision)?;
        if let Err(e) = draft.on_update(update, context).await {
            warn!(entity_type, %id, error = %e, "Update failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        self.commit(id.clone(), draft.clone())?;
        info!(entity_type, %id, revision = draft.revision(), "Updated");
        Ok(draft)
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let entity_type = self.entity_type;
        let Some(item) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        self.store.remove(&id);
        self.publish();
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        expected_revision: Option<u64>,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let entity_type = self.entity_type;
        let mut draft = self.draft(&id, expected_revision)?;
        match draft.handle_action(action, context).await {
            Ok(result) => {
                let revision = draft.revision();
                self.commit(id.clone(), draft)?;
                info!(entity_type, %id, revision, "Action ok");
                Ok(result)
            }
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Action failed");
                Err(FrameworkError::EntityError(Box::new(e)))
            }
        }
    }

    /// Copy of the stored document with its revision already advanced.
    fn draft(&self, id: &T::Id, expected_revision: Option<u64>) -> Result<T, FrameworkError> {
        let entity_type = self.entity_type;
        let Some(current) = self.store.get(id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let actual = current.revision();
        if let Some(expected) = expected_revision {
            if expected != actual {
                warn!(entity_type, %id, expected, actual, "Stale revision");
                return Err(FrameworkError::Conflict {
                    id: id.to_string(),
                    expected,
                    actual,
                });
            }
        }
        let mut draft = current.clone();
        draft.set_revision(actual + 1);
        Ok(draft)
    }

    fn commit(&mut self, id: T::Id, item: T) -> Result<(), FrameworkError> {
        if let Some(key) = item.unique_key() {
            let taken = self
                .store
                .iter()
                .any(|(other_id, other)| *other_id != id && other.unique_key().as_ref() == Some(&key));
            if taken {
                warn!(entity_type = self.entity_type, %id, %key, "Duplicate key");
                return Err(FrameworkError::Duplicate(key));
            }
        }
        self.store.insert(id, item);
        self.publish();
        Ok(())
    }

    fn publish(&self) {
        let snapshot: Vec<T> = self.store.values().cloned().collect();
        self.snapshots.send_replace(Arc::new(snapshot));
    }
}
