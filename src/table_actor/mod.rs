//! # Table Actor
//!
//! Owns the `tables` collection and the occupancy state machine:
//!
//! ```text
//! available --occupy--> occupied --release--> available
//! reserved  (admin marker, never occupiable)
//! ```
//!
//! Invariant: `session_id` is set iff the table is occupied. Every occupation mints a
//! new session, so successive parties at the same table never share one.
//!
//! ## Structure
//!
//! - [`entity`] - [`Document`](resource_store::Document) implementation for [`Table`]
//! - [`actions`] - [`TableAction`] (occupy / release)
//! - [`error`] - [`TableError`]
//! - [`new()`] - Factory function that creates the actor and its client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TableClient;
use crate::model::Table;
use resource_store::ResourceActor;

/// Creates a new Table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Table>, TableClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, TableClient::new(generic_client))
}
