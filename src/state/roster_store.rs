//! Latest authoritative roster snapshot.

use crate::model::{Player, PlayerId, RosterSnapshot, ServerSnapshot, User};

/// Holds the most recent `server-status` push.
///
/// Every push replaces the whole snapshot. Nothing from a previous snapshot
/// survives a replacement.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    current: Option<RosterSnapshot>,
    replacements: u64,
}

impl RosterStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot wholesale.
    pub fn replace(&mut self, snapshot: RosterSnapshot) {
        self.current = Some(snapshot);
        self.replacements += 1;
    }

    /// The whole snapshot, if one has arrived.
    pub fn snapshot(&self) -> Option<&RosterSnapshot> {
        self.current.as_ref()
    }

    /// Server status figures, if a snapshot has arrived.
    pub fn status(&self) -> Option<&ServerSnapshot> {
        self.current.as_ref().map(|s| &s.status)
    }

    /// Connected players; empty before the first snapshot.
    pub fn players(&self) -> &[Player] {
        self.current.as_ref().map_or(&[], |s| &s.players)
    }

    /// Registered users; empty before the first snapshot.
    pub fn users(&self) -> &[User] {
        self.current.as_ref().map_or(&[], |s| &s.users)
    }

    /// Find a connected player.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.current.as_ref().and_then(|s| s.player(id))
    }

    /// Whether `id` is a connected player.
    pub fn contains_player(&self, id: &PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// Number of snapshots applied.
    pub fn replacements(&self) -> u64 {
        self.replacements
    }
}
