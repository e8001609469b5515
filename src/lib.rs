//! # Tableside
//!
//! Session-scoped table, order and bill lifecycle for a dine-in restaurant.
//!
//! A party sits down, a table is occupied and a new session id is minted; every order
//! and the final bill carry that session id, so successive parties at the same table
//! never see each other's orders. Settlement records the bill, releases the table and
//! closes the session's orders.
//!
//! ## Architecture
//!
//! Each collection (`tables`, `orders`, `bills`) is owned by one
//! [`ResourceActor`](resource_store::ResourceActor) running in its own Tokio task.
//! Requests to a collection are applied one at a time, which makes a table's
//! `available -> occupied` check and the session assignment a single step.
//!
//! - [`model`] - documents and payloads ([`Table`](model::Table), [`Order`](model::Order),
//!   [`Bill`](model::Bill)), menu and cart helpers
//! - [`table_actor`], [`order_actor`], [`bill_actor`] - document hooks, actions and errors
//! - [`clients`] - typed clients hiding the message passing
//! - [`billing`] - bill computation and the multi-collection settlement workflow
//! - [`projections`] - per-role dashboards derived from live snapshots
//! - [`lifecycle`] - [`RestaurantSystem`](lifecycle::RestaurantSystem), which starts and
//!   wires everything
//!
//! ## Errors
//!
//! Every domain error implements [`Classify`](error::Classify), mapping it to
//! validation, transport, conflict or inconsistent state.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod bill_actor;
pub mod billing;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod projections;
pub mod session;
pub mod settings;
pub mod table_actor;
