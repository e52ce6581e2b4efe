//! Connection lifecycle state machine.

use std::fmt;
use thiserror::Error;

/// Lifecycle of the server connection as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// A connection attempt is in progress.
    #[default]
    Connecting,
    /// The socket is open; console input is enabled.
    Connected,
    /// The connection was lost; the transport will retry.
    Disconnected,
}

/// A transition the state machine does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal connection transition {from} -> {to}")]
pub struct IllegalTransition {
    /// State before the attempted transition.
    pub from: ConnectionState,
    /// Requested state.
    pub to: ConnectionState,
}

impl ConnectionState {
    /// Move to `to`.
    ///
    /// Legal moves are connecting to connected, connected to disconnected and
    /// disconnected to connecting. Requesting the current state is a no-op.
    pub fn transition(self, to: ConnectionState) -> Result<ConnectionState, IllegalTransition> {
        use ConnectionState::*;
        match (self, to) {
            (a, b) if a == b => Ok(a),
            (Connecting, Connected) | (Connected, Disconnected) | (Disconnected, Connecting) => {
                Ok(to)
            }
            (from, to) => Err(IllegalTransition { from, to }),
        }
    }

    /// Whether operator input may be submitted.
    pub fn accepts_input(self) -> bool {
        self == ConnectionState::Connected
    }

    /// Short label for the status indicator.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
