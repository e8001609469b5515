//! # Bill Actor
//!
//! Owns the `bills` collection. Written only by the billing engine; the session id is
//! the unique key, so a session can be billed at most once even if two settlements
//! race past every other guard.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::BillClient;
use crate::model::Bill;
use resource_store::ResourceActor;

/// Creates a new Bill actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Bill>, BillClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, BillClient::new(generic_client))
}
