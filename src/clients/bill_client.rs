//! # Bill Client
use crate::bill_actor::BillError;
use crate::model::{Bill, BillCreate, BillStatus};
use crate::session::SessionId;
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient, Subscription};
use tracing::{debug, info, instrument};

/// Client for interacting with the Bill actor.
#[derive(Clone)]
pub struct BillClient {
    inner: ResourceClient<Bill>,
}

#[async_trait]
impl ActorClient<Bill> for BillClient {
    type Error = BillError;

    fn inner(&self) -> &ResourceClient<Bill> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => BillError::NotFound(id),
            FrameworkError::Duplicate(session) => BillError::AlreadySettled(session),
            other => other
                .downcast_entity::<BillError>()
                .unwrap_or_else(|e| BillError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl BillClient {
    pub fn new(inner: ResourceClient<Bill>) -> Self {
        Self { inner }
    }

    /// Issues a paid bill and returns it as stored.
    #[instrument(skip(self, params), fields(session = %params.draft.session_id))]
    pub async fn record(&self, params: BillCreate) -> Result<Bill, BillError> {
        debug!(total = %params.draft.total, "Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        let bill = self
            .get(id)
            .await?
            .ok_or_else(|| BillError::NotFound(id.to_string()))?;
        info!(bill_id = %bill.id, total = %bill.total, "Bill recorded");
        Ok(bill)
    }

    /// The bill issued for `session`, if any.
    pub async fn for_session(&self, session: SessionId) -> Result<Option<Bill>, BillError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|b| b.session_id == session))
    }

    /// Deletes every paid bill. Returns how many were removed.
    #[instrument(skip(self))]
    pub async fn purge_paid_bills(&self) -> Result<usize, BillError> {
        let mut removed = 0;
        for bill in self.list().await? {
            if bill.status == BillStatus::Paid {
                self.delete(bill.id).await?;
                removed += 1;
            }
        }
        info!(count = removed, "Paid bills purged");
        Ok(removed)
    }

    pub fn subscribe<F>(&self, filter: F) -> Subscription<Bill>
    where
        F: Fn(&Bill) -> bool + Send + Sync + 'static,
    {
        self.inner.subscribe(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_session_means_already_settled() {
        let err = BillClient::map_error(FrameworkError::Duplicate("abc".to_string()));
        assert_eq!(err, BillError::AlreadySettled("abc".to_string()));
    }
}
