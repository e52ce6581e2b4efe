//! Outbound operator input.

use serde::Serialize;

/// Operator input packaged for the `console-input` event.
///
/// Serializes to `{"command": ...}` or `{"message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleInput {
    /// A server command, command marker already stripped.
    Command(String),
    /// A chat message broadcast from the console.
    Message(String),
}

impl ConsoleInput {
    /// The payload text without the variant.
    pub fn text(&self) -> &str {
        match self {
            ConsoleInput::Command(s) | ConsoleInput::Message(s) => s,
        }
    }
}
