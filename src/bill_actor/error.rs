//! Error types for the Bill actor.

use crate::error::{Classify, ErrorClass};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BillError {
    #[error("Bill validation error: {0}")]
    Validation(String),

    /// A bill already exists for this session.
    #[error("Session {0} is already billed")]
    AlreadySettled(String),

    #[error("Bill not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl Classify for BillError {
    fn class(&self) -> ErrorClass {
        match self {
            BillError::Validation(_) => ErrorClass::Validation,
            BillError::AlreadySettled(_) => ErrorClass::Conflict,
            BillError::NotFound(_) => ErrorClass::InconsistentState,
            BillError::ActorCommunicationError(_) => ErrorClass::Transport,
        }
    }
}
