//! Operator input routing.
//!
//! Classifies typed text as a console command or a chat message, hands it to
//! the outbound sink and records it in the recall history.

use crate::model::ConsoleInput;
use serde::Deserialize;
use std::collections::VecDeque;

#[cfg(test)]
#[path = "input_router_tests.rs"]
mod tests;

/// Default command marker.
pub const DEFAULT_COMMAND_MARKER: char = '/';
/// Default history length.
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// Destination for accepted operator input. Sends are fire-and-forget.
pub trait OutboundSink {
    /// Transmit one input.
    fn send(&mut self, input: ConsoleInput);
}

impl OutboundSink for Vec<ConsoleInput> {
    fn send(&mut self, input: ConsoleInput) {
        self.push(input);
    }
}

/// What to do with input that is empty or whitespace only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyInputPolicy {
    /// Transmit nothing. A bare command marker is dropped too.
    #[default]
    Drop,
    /// Transmit the input verbatim as a chat message.
    #[serde(rename = "send")]
    SendEmptyMessage,
}

/// Routes operator input to commands or chat messages.
#[derive(Debug, Clone)]
pub struct InputRouter {
    marker: char,
    policy: EmptyInputPolicy,
    history: InputHistory,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(
            DEFAULT_COMMAND_MARKER,
            EmptyInputPolicy::default(),
            DEFAULT_HISTORY_SIZE,
        )
    }
}

impl InputRouter {
    /// Create a router.
    pub fn new(marker: char, policy: EmptyInputPolicy, history_size: usize) -> Self {
        Self {
            marker,
            policy,
            history: InputHistory::new(history_size),
        }
    }

    /// Classify `raw` without side effects.
    ///
    /// A leading marker makes the remainder a command; anything else is a
    /// chat message. Text is otherwise passed through unchanged.
    pub fn route(&self, raw: &str) -> Option<ConsoleInput> {
        let blank = raw.trim().is_empty();
        if blank {
            return match self.policy {
                EmptyInputPolicy::Drop => None,
                EmptyInputPolicy::SendEmptyMessage => Some(ConsoleInput::Message(raw.to_string())),
            };
        }

        match raw.strip_prefix(self.marker) {
            Some(rest) if rest.trim().is_empty() && self.policy == EmptyInputPolicy::Drop => None,
            Some(rest) => Some(ConsoleInput::Command(rest.to_string())),
            None => Some(ConsoleInput::Message(raw.to_string())),
        }
    }

    /// Route `raw` and, if accepted, send it and record it in history.
    pub fn submit(&mut self, raw: &str, sink: &mut dyn OutboundSink) -> Option<ConsoleInput> {
        let Some(input) = self.route(raw) else {
            tracing::debug!("Dropped empty console input");
            self.history.reset_navigation();
            return None;
        };
        self.history.record(raw);
        sink.send(input.clone());
        Some(input)
    }

    /// Input recall history.
    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    /// Mutable input recall history.
    pub fn history_mut(&mut self) -> &mut InputHistory {
        &mut self.history
    }
}

/// Bounded recall history of submitted input.
///
/// Navigating away from the input line saves it as a draft, which comes back
/// after stepping past the newest entry.
#[derive(Debug, Clone)]
pub struct InputHistory {
    entries: VecDeque<String>,
    capacity: usize,
    /// Index into `entries` while navigating
    cursor: Option<usize>,
    draft: String,
}

impl InputHistory {
    /// Create an empty history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            cursor: None,
            draft: String::new(),
        }
    }

    /// Record a submitted entry. Consecutive duplicates are stored once.
    pub fn record(&mut self, entry: &str) {
        self.reset_navigation();
        if self.capacity == 0 || self.entries.back().is_some_and(|last| last == entry) {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.to_string());
    }

    /// Step to an older entry. `current` is saved as the draft on the first
    /// step. Returns `None` when there is nothing older.
    pub fn previous(&mut self, current: &str) -> Option<&str> {
        let index = match self.cursor {
            None if self.entries.is_empty() => return None,
            None => {
                self.draft = current.to_string();
                self.entries.len() - 1
            }
            Some(0) => return None,
            Some(i) => i - 1,
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Step to a newer entry, ending with the saved draft. Returns `None`
    /// when not navigating.
    pub fn next(&mut self) -> Option<&str> {
        let i = self.cursor?;
        if i + 1 < self.entries.len() {
            self.cursor = Some(i + 1);
            self.entries.get(i + 1).map(String::as_str)
        } else {
            self.cursor = None;
            Some(self.draft.as_str())
        }
    }

    /// Stop navigating.
    pub fn reset_navigation(&mut self) {
        self.cursor = None;
        self.draft.clear();
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &VecDeque<String> {
        &self.entries
    }

    /// Whether an entry is currently recalled.
    pub fn is_navigating(&self) -> bool {
        self.cursor.is_some()
    }
}
