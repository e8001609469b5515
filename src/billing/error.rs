//! Error types for billing and settlement.

use super::SettlementProgress;
use crate::bill_actor::BillError;
use crate::error::{Classify, ErrorClass};
use crate::model::OrderId;
use crate::order_actor::OrderError;
use crate::table_actor::TableError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BillingError {
    /// The session has no orders, or only zero-value ones.
    #[error("Nothing to bill for table {0}")]
    NothingToBill(u32),

    /// E.g. billing a table with no session, or orders from another seating.
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    /// Another settlement of the same table has not finished yet.
    #[error("Table {0} is already being settled")]
    SettleInProgress(u32),

    #[error("Session {0} is already billed")]
    AlreadySettled(String),

    /// The table or its orders changed since the caller read them.
    #[error("{0}")]
    Conflict(String),

    /// `free_table` on a session that still owes money.
    #[error("Table {number} has an outstanding balance of {total}")]
    OutstandingBalance { number: u32, total: Decimal },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Orders submitted while the session was being closed. They were closed with it
    /// but no bill covers them.
    #[error("Table {table_number} was released with unbilled orders {orders:?}")]
    UnbilledOrders {
        table_number: u32,
        orders: Vec<OrderId>,
    },

    /// The bill is recorded but the table or orders were not reset.
    /// Pass the progress to [`BillingEngine::resume`](super::BillingEngine::resume).
    #[error("{0}")]
    PartialSettlement(Box<SettlementProgress>),
}

impl BillingError {
    fn of_class(class: ErrorClass, message: String) -> Self {
        match class {
            ErrorClass::Validation => BillingError::Validation(message),
            ErrorClass::Transport => BillingError::Transport(message),
            ErrorClass::Conflict => BillingError::Conflict(message),
            ErrorClass::InconsistentState => BillingError::InconsistentState(message),
        }
    }
}

impl From<TableError> for BillingError {
    fn from(e: TableError) -> Self {
        Self::of_class(e.class(), e.to_string())
    }
}

impl From<OrderError> for BillingError {
    fn from(e: OrderError) -> Self {
        Self::of_class(e.class(), e.to_string())
    }
}

impl From<BillError> for BillingError {
    fn from(e: BillError) -> Self {
        match e {
            BillError::AlreadySettled(session) => BillingError::AlreadySettled(session),
            other => Self::of_class(other.class(), other.to_string()),
        }
    }
}

impl Classify for BillingError {
    fn class(&self) -> ErrorClass {
        match self {
            BillingError::NothingToBill(_)
            | BillingError::OutstandingBalance { .. }
            | BillingError::Validation(_) => ErrorClass::Validation,
            BillingError::SettleInProgress(_)
            | BillingError::AlreadySettled(_)
            | BillingError::Conflict(_) => ErrorClass::Conflict,
            BillingError::InconsistentState(_) | BillingError::UnbilledOrders { .. } => {
                ErrorClass::InconsistentState
            }
            BillingError::Transport(_) | BillingError::PartialSettlement(_) => {
                ErrorClass::Transport
            }
        }
    }
}
