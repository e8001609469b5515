//! # Store Messages
//!
//! Request types sent from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::Document;
use crate::error::FrameworkError;
use std::sync::Arc;
use tokio::sync::oneshot;

/// One-shot reply channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// The full document set of a collection as published after a commit.
///
/// Order is unspecified; consumers sort for presentation.
pub type Snapshot<T> = Arc<Vec<T>>;

/// Request sent to the actor.
///
/// The variants map to the document-store operations (create, get, list, update,
/// delete) plus `Action` for document-specific mutations. `expected_revision` turns
/// an update or action into a compare-and-set: the actor rejects it with
/// [`FrameworkError::Conflict`] when the stored revision differs.
#[derive(Debug)]
pub enum ResourceRequest<T: Document> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        expected_revision: Option<u64>,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        expected_revision: Option<u64>,
        respond_to: Response<T::ActionResult>,
    },
}
