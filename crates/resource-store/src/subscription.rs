//! # Subscriptions
//!
//! A filtered, push-style view over one collection. Built on the `watch` channel the
//! actor publishes to, so a slow consumer never blocks writers: it simply skips to the
//! newest snapshot the next time it looks.

use crate::entity::Document;
use crate::error::FrameworkError;
use crate::message::Snapshot;
use std::sync::Arc;
use tokio::sync::watch;

type Filter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Live, filtered result set of a collection.
pub struct Subscription<T: Document> {
    receiver: watch::Receiver<Snapshot<T>>,
    filter: Filter<T>,
}

impl<T: Document> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl<T: Document> Subscription<T> {
    pub(crate) fn new<F>(mut receiver: watch::Receiver<Snapshot<T>>, filter: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        receiver.borrow_and_update();
        Self {
            receiver,
            filter: Arc::new(filter),
        }
    }

    /// Documents matching the filter in the latest snapshot.
    pub fn current(&self) -> Vec<T> {
        let snapshot = self.receiver.borrow().clone();
        self.apply(&snapshot)
    }

    /// Waits for the next commit to the collection and returns the new matching set.
    ///
    /// Fails with [`FrameworkError::ActorClosed`] once the owning actor has stopped.
    pub async fn changed(&mut self) -> Result<Vec<T>, FrameworkError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        let snapshot = self.receiver.borrow_and_update().clone();
        Ok(self.apply(&snapshot))
    }

    fn apply(&self, snapshot: &Snapshot<T>) -> Vec<T> {
        snapshot
            .iter()
            .filter(|item| (self.filter)(*item))
            .cloned()
            .collect()
    }
}
