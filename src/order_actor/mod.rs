//! # Order Actor
//!
//! Owns the `orders` collection. An order is bound to the session its table held when
//! it was submitted; `on_create` re-checks that binding against the live table, so an
//! order can never be attached to a released or re-seated table.
//!
//! ```text
//! pending -> preparing -> ready -> served
//! (reception's direct entry creates orders already served)
//! ```
//!
//! ## Structure
//!
//! - [`entity`] - [`Document`](resource_store::Document) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`] (advance / serve)
//! - [`error`] - [`OrderError`]
//! - [`queries`] - pure filters used by dashboards and billing
//! - [`new()`] - Factory function that creates the actor and its client
//!
//! The actor must be run with a [`TableClient`](crate::clients::TableClient) as context:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32);
//! tokio::spawn(order_actor.run(table_client.clone()));
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod queries;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use resource_store::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
