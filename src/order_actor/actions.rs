//! Custom actions for the Order actor.

use crate::model::OrderStatus;
use chrono::{DateTime, Utc};

/// Status changes. Both return the order as committed.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Kitchen/waiter step along `pending -> preparing -> ready -> served`.
    ///
    /// Only the immediate successor is accepted. Advancing to the current status is a
    /// no-op.
    Advance { to: OrderStatus, at: DateTime<Utc> },
    /// Settlement close-out: marks the order served from any status.
    /// An order that is already served keeps its original `served_at`.
    Serve { at: DateTime<Utc> },
}
