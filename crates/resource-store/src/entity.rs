//! # Document Trait
//!
//! The `Document` trait is the contract every stored resource (Table, Order, Bill, ...)
//! implements to be owned by a [`ResourceActor`](crate::ResourceActor). It names the
//! DTOs used to create and update the document, the custom actions it accepts, the
//! context injected into its hooks and its error type.
//!
//! # Provided Methods (Hooks)
//! - [`Document::on_create`] and [`Document::on_delete`] default to `Ok(())`.
//! - [`Document::unique_key`] defaults to `None` (no uniqueness constraint).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored document must implement to be managed by a `ResourceActor`.
///
/// # Revisions
/// The store owns the revision counter: it sets revision `1` on create and increments
/// it on every committed update or action. The document only has to carry the value.
///
/// # Atomic mutations
/// `on_update` and `handle_action` run on a copy of the stored document. If they
/// return an error the copy is discarded, so a hook may mutate `self` freely before
/// deciding to reject.
#[async_trait]
pub trait Document: Clone + Send + Sync + 'static {
    /// Storage identity. Built from the store's sequence counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new document.
    type Create: Send + Sync + Debug;

    /// Payload for a whole-document update.
    type Update: Send + Sync + Debug;

    /// Document-specific operations (state transitions).
    type Action: Send + Sync + Debug;

    /// Result returned by [`Document::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// Error type for this document. One enum per collection.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the document from its id and creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Current store revision.
    fn revision(&self) -> u64;

    /// Called by the store when the document is committed.
    fn set_revision(&mut self, revision: u64);

    /// A key that must be unique across the collection, if any.
    ///
    /// The store rejects a create or a mutation that would give two documents the same
    /// key with [`FrameworkError::Duplicate`](crate::FrameworkError::Duplicate).
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after `from_create_params`, before the document is stored.
    /// Use it to validate against other collections reachable through the context.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a whole-document update.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the document is removed. Returning an error vetoes the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a document-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
