//! Events delivered by a transport to the console state.

use crate::model::RosterSnapshot;

/// One inbound event, already decoded and sanitized.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A connection attempt started.
    Connecting,
    /// The connection is open.
    Connected,
    /// The connection was lost.
    Disconnected {
        /// Human-readable cause, for the log file only.
        reason: String,
    },
    /// Console lines in arrival order.
    ConsoleLines(Vec<String>),
    /// A complete, validated roster snapshot.
    ServerStatus(RosterSnapshot),
}
