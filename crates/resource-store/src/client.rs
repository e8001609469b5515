//! # Resource Client
//!
//! The typed handle used to talk to a [`ResourceActor`](crate::ResourceActor).

use crate::entity::Document;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Snapshot};
use crate::subscription::Subscription;
use tokio::sync::{mpsc, oneshot, watch};

/// A type-safe client for a `ResourceActor`.
///
/// Holds the request sender and a receiver for published snapshots, so cloning is
/// cheap and clones can be handed to any number of tasks. Each method sends one
/// request and waits for the reply on a oneshot channel.
pub struct ResourceClient<T: Document> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    snapshots: watch::Receiver<Snapshot<T>>,
}

impl<T: Document> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshots: self.snapshots.clone(),
        }
    }
}

impl<T: Document> ResourceClient<T> {
    pub fn new(
        sender: mpsc::Sender<ResourceRequest<T>>,
        snapshots: watch::Receiver<Snapshot<T>>,
    ) -> Self {
        Self { sender, snapshots }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            expected_revision: None,
            respond_to,
        })
        .await
    }

    /// Update that only applies if the stored document is still at `expected_revision`.
    pub async fn update_if(
        &self,
        id: T::Id,
        update: T::Update,
        expected_revision: u64,
    ) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            expected_revision: Some(expected_revision),
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            expected_revision: None,
            respond_to,
        })
        .await
    }

    /// Action that only applies if the stored document is still at `expected_revision`.
    pub async fn perform_action_if(
        &self,
        id: T::Id,
        action: T::Action,
        expected_revision: u64,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            expected_revision: Some(expected_revision),
            respond_to,
        })
        .await
    }

    /// The most recently published document set, without a round trip to the actor.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshots.borrow().clone()
    }

    /// Live view of the documents matching `filter`.
    ///
    /// The subscription starts with the current matching set and yields a new set
    /// after every commit to the collection.
    pub fn subscribe<F>(&self, filter: F) -> Subscription<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Subscription::new(self.snapshots.clone(), filter)
    }
}
