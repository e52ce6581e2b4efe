//! Identifier newtypes with smart constructors.
//!
//! Roster entities are keyed by the uuid string the server sends. Identifiers
//! validate non-empty strings at construction time; the raw constructor is
//! never exported.

use std::fmt;
use thiserror::Error;

/// Stable identifier of a player or registered user (the server-side uuid).
///
/// Used as the key for selection tracking: a selection holds a `PlayerId`,
/// never a reference to the `Player` itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

/// Error returned when a player identifier is empty or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("player id must not be empty")]
pub struct InvalidPlayerId;

impl PlayerId {
    /// Smart constructor: validates a non-blank id and trims surrounding whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidPlayerId> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidPlayerId);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
