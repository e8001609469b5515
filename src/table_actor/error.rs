//! Error types for the Table actor.

use crate::error::{Classify, ErrorClass};
use crate::model::TableStatus;
use thiserror::Error;

/// Errors that can occur during table operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    /// Bad guest details or admin input.
    #[error("Table validation error: {0}")]
    Validation(String),

    /// Occupy was attempted on a table that is not available.
    #[error("Table {number} is {status}, not available")]
    NotAvailable { number: u32, status: TableStatus },

    /// Release was attempted on a table with no party seated.
    #[error("Table {0} is not occupied")]
    NotOccupied(u32),

    /// The table is seating a different session than the caller expected.
    #[error("Table {0} holds a different session")]
    SessionMismatch(u32),

    /// The change is not allowed while the table is occupied.
    #[error("Table {0} is occupied")]
    Occupied(u32),

    #[error("Table number {0} already exists")]
    DuplicateNumber(String),

    /// The table changed since the caller read it.
    #[error("Table {0} was modified concurrently, reload and retry")]
    Conflict(String),

    #[error("Table not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl Classify for TableError {
    fn class(&self) -> ErrorClass {
        match self {
            TableError::Validation(_)
            | TableError::NotAvailable { .. }
            | TableError::NotOccupied(_)
            | TableError::Occupied(_)
            | TableError::DuplicateNumber(_) => ErrorClass::Validation,
            TableError::Conflict(_) => ErrorClass::Conflict,
            TableError::SessionMismatch(_) | TableError::NotFound(_) => {
                ErrorClass::InconsistentState
            }
            TableError::ActorCommunicationError(_) => ErrorClass::Transport,
        }
    }
}
