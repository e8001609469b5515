//! Error types for the Order actor.

use crate::error::{Classify, ErrorClass};
use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Empty item list, zero quantity, negative price or an unavailable menu item.
    #[error("Order validation error: {0}")]
    Validation(String),

    /// The table is not occupied, or is occupied by a different session.
    #[error("Table {0} has no matching active session")]
    InvalidSession(u32),

    /// The kitchen tried to move an order anywhere but to its next status.
    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The order changed since the caller read it.
    #[error("Order {0} was modified concurrently, reload and retry")]
    Conflict(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl Classify for OrderError {
    fn class(&self) -> ErrorClass {
        match self {
            OrderError::Validation(_)
            | OrderError::InvalidSession(_)
            | OrderError::InvalidTransition { .. } => ErrorClass::Validation,
            OrderError::Conflict(_) => ErrorClass::Conflict,
            OrderError::NotFound(_) => ErrorClass::InconsistentState,
            OrderError::ActorCommunicationError(_) => ErrorClass::Transport,
        }
    }
}
