//! # Resource Store
//!
//! An in-process document store built on the Actor Model. Every collection of documents
//! (tables, orders, bills, ...) is owned by exactly one [`ResourceActor`] running in its
//! own Tokio task. Callers never touch the collection directly: they hold a cheap,
//! cloneable [`ResourceClient`] and send it requests.
//!
//! ## Operations
//!
//! The store offers the operations a shared document collection needs:
//!
//! - `create`, `get`, `list`, `update`, `delete` on whole documents
//! - `perform_action` for document-specific mutations (state machine transitions)
//! - `subscribe(filter)` for a live stream of the filtered document set
//!
//! Mutations are applied to a copy of the document and only committed when the
//! document's hooks accept them. Every commit bumps the document's revision, which
//! callers can pass back (`update_if`, `perform_action_if`) to reject writes based
//! on a stale read.
//!
//! ## Architecture Overview
//!
//! 1. **Document Layer** ([`Document`]) - the domain type, its DTOs and lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - sequential request processing and snapshots
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`], [`Subscription`]) - typed access
//!
//! ```rust
//! use resource_store::{Document, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Note { id: u32, text: String, revision: u64 }
//! #[derive(Debug)] struct NoteCreate { text: String }
//! #[derive(Debug)] struct NoteUpdate { text: String }
//! #[derive(Debug)] enum NoteAction {}
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl Document for Note {
//!     type Id = u32;
//!     type Create = NoteCreate;
//!     type Update = NoteUpdate;
//!     type Action = NoteAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = NoteError;
//!
//!     fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, NoteError> {
//!         Ok(Self { id, text: params.text, revision: 0 })
//!     }
//!     fn revision(&self) -> u64 { self.revision }
//!     fn set_revision(&mut self, revision: u64) { self.revision = revision; }
//!     async fn on_update(&mut self, update: NoteUpdate, _: &()) -> Result<(), NoteError> {
//!         self.text = update.text;
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, action: NoteAction, _: &()) -> Result<(), NoteError> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Note>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(NoteCreate { text: "table 4 allergy".into() }).await.unwrap();
//!     let note = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(note.revision, 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts (`run(context)`), not when it is
//! built. A document whose creation must be validated against another collection
//! declares that collection's client as its `Context`.
//!
//! ## Testing
//!
//! See the [`mock`] module for an expectation-driven client that needs no actor, which
//! makes transport failures easy to inject.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod subscription;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::Document;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response, Snapshot};
pub use subscription::Subscription;
