//! # Session Identity
//!
//! A session is one continuous occupation of a table by one party. Its id is minted
//! when the table becomes occupied and written into the table in the same commit; it
//! is never reused. Ending a session is implicit: the table simply stops carrying it.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// 128-bit random token identifying one seating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mints a fresh session id.
    pub fn begin() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sessions_are_never_reused() {
        let minted: HashSet<SessionId> = (0..1_000).map(|_| SessionId::begin()).collect();
        assert_eq!(minted.len(), 1_000);
    }

    #[test]
    fn serializes_as_plain_uuid_string() {
        let id = SessionId::begin();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
