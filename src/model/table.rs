//! A physical seating unit and its occupancy.
//!
//! # Resource Store
//! `Table` implements [`Document`](resource_store::Document) in
//! [`table_actor::entity`](crate::table_actor::entity): occupy and release are actions,
//! admin edits are updates, and the table number is the collection's unique key.

use crate::session::SessionId;
use crate::table_actor::TableError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::LazyLock;

/// Type-safe identifier for Tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub u32);

impl From<u32> for TableId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        }
    }
}

impl Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    pub number: u32,
    pub capacity: u32,
    pub status: TableStatus,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub occupied_at: Option<DateTime<Utc>>,
    pub waiter_id: Option<String>,
    pub session_id: Option<SessionId>,
    pub revision: u64,
}

impl Table {
    pub fn is_occupied(&self) -> bool {
        self.status == TableStatus::Occupied
    }

    /// True when the table's current seating is `session`.
    pub fn holds_session(&self, session: &SessionId) -> bool {
        self.session_id.as_ref() == Some(session)
    }

    /// How long the current party has been seated.
    pub fn occupied_for(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        match (self.status, self.occupied_at) {
            (TableStatus::Occupied, Some(since)) => {
                Some((now - since).max(chrono::Duration::zero()))
            }
            _ => None,
        }
    }
}

/// Payload for adding a table to the floor.
#[derive(Debug, Clone)]
pub struct TableCreate {
    pub number: u32,
    pub capacity: u32,
    pub status: TableStatus,
}

/// Administrative edit. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TableUpdate {
    pub number: Option<u32>,
    pub capacity: Option<u32>,
    pub status: Option<TableStatus>,
}

/// Validated guest registration.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestDetails {
    name: String,
    phone: String,
}

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("phone pattern is valid"));

impl GuestDetails {
    /// Trims both fields; the name must be non-empty and the phone made of digits,
    /// spaces, dashes and parentheses with an optional leading `+`.
    pub fn new(name: &str, phone: &str) -> Result<Self, TableError> {
        let name = name.trim();
        let phone = phone.trim();
        if name.is_empty() {
            return Err(TableError::Validation("Guest name is required".to_string()));
        }
        if phone.is_empty() {
            return Err(TableError::Validation("Phone number is required".to_string()));
        }
        if !PHONE.is_match(phone) {
            return Err(TableError::Validation(format!(
                "Please enter a valid phone number: {phone}"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Number to suggest for a new table: one past the highest in use.
pub fn next_table_number(tables: &[Table]) -> u32 {
    tables.iter().map(|t| t.number).max().unwrap_or(0) + 1
}
