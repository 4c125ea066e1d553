//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Zero-based position of a turn within a session's append-only log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TurnIndex(u32);

impl TurnIndex {
    /// The first turn of a session.
    pub fn first() -> Self {
        Self(0)
    }

    /// Creates a turn index from a raw value.
    pub fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Returns the index of the following turn.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw index value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TurnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_roundtrips_through_string() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn session_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn turn_index_starts_at_zero_and_increments() {
        let first = TurnIndex::first();
        assert_eq!(first.as_u32(), 0);
        assert_eq!(first.next().as_u32(), 1);
        assert_eq!(first.next().next().as_u32(), 2);
    }

    #[test]
    fn turn_index_serializes_transparently() {
        let idx = TurnIndex::from_u32(7);
        assert_eq!(serde_json::to_string(&idx).unwrap(), "7");
    }
}
