//! Custom actions for the Table actor.
//!
//! These are the two transitions of the occupancy state machine. Both return the
//! table as committed, so callers see the new session id and revision without a
//! second round trip.

use crate::model::GuestDetails;
use crate::session::SessionId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum TableAction {
    /// `available -> occupied`. Mints a new session for the party.
    Occupy {
        guest: GuestDetails,
        waiter_id: String,
        at: DateTime<Utc>,
    },
    /// `occupied -> available`. When `session` is given, the table must still hold it.
    Release { session: Option<SessionId> },
}
