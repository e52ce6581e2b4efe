//! Single player selection, kept consistent with the roster.

use super::roster_store::RosterStore;
use crate::model::PlayerId;

/// Tracks at most one selected player by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<PlayerId>,
}

impl SelectionController {
    /// No selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected id.
    pub fn selected(&self) -> Option<&PlayerId> {
        self.selected.as_ref()
    }

    /// Select `id`, or clear the selection if `id` is already selected.
    ///
    /// Returns the selection after the toggle.
    pub fn toggle(&mut self, id: PlayerId) -> Option<&PlayerId> {
        if self.selected.as_ref() == Some(&id) {
            self.selected = None;
        } else {
            self.selected = Some(id);
        }
        self.selected.as_ref()
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Drop the selection if its player is not in `roster`.
    ///
    /// Returns whether the selection was cleared.
    pub fn reconcile(&mut self, roster: &RosterStore) -> bool {
        match &self.selected {
            Some(id) if !roster.contains_player(id) => {
                tracing::debug!(player = %id, "Selected player left the roster");
                self.selected = None;
                true
            }
            _ => false,
        }
    }
}
