//! Transports feeding the console.
//!
//! - WebSocket: live connection with reconnect
//! - Replay: recorded frames from a file
//! - Unified `Transport` enum for both

pub mod protocol;
pub mod replay;
pub mod websocket;

pub use protocol::{decode_frame, encode_input};
pub use replay::ReplayTransport;
pub use websocket::{ReconnectPolicy, WebSocketTransport};

use crate::model::{ConsoleInput, TransportError, TransportEvent};
use crate::state::OutboundSink;
use std::path::PathBuf;

/// Source of inbound events and sink for operator input.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum Transport {
    /// Live socket.
    WebSocket(WebSocketTransport),
    /// Recorded frames.
    Replay(ReplayTransport),
}

impl Transport {
    /// Drain available events without blocking, in arrival order.
    pub fn poll(&mut self) -> Vec<TransportEvent> {
        match self {
            Transport::WebSocket(ws) => ws.poll(),
            Transport::Replay(replay) => replay.poll(),
        }
    }

    /// The replay, when replaying.
    pub fn as_replay(&self) -> Option<&ReplayTransport> {
        match self {
            Transport::Replay(replay) => Some(replay),
            Transport::WebSocket(_) => None,
        }
    }

    /// Whether this transport follows a live server.
    pub fn is_live(&self) -> bool {
        matches!(self, Transport::WebSocket(_))
    }
}

impl OutboundSink for Transport {
    fn send(&mut self, input: ConsoleInput) {
        match self {
            Transport::WebSocket(ws) => ws.send(input),
            Transport::Replay(replay) => replay.send(input),
        }
    }
}

/// Pick the transport.
///
/// A replay file wins over a server URL. `hold_replay` keeps a replay
/// connected after its last frame.
///
/// # Errors
///
/// `TransportError::NoServer` when neither is given, otherwise whatever
/// opening the chosen transport reports.
pub fn open_transport(
    url: Option<&str>,
    replay: Option<PathBuf>,
    hold_replay: bool,
    policy: ReconnectPolicy,
) -> Result<Transport, TransportError> {
    match (replay, url) {
        (Some(path), _) => Ok(Transport::Replay(
            ReplayTransport::open(&path)?.hold_open(hold_replay),
        )),
        (None, Some(url)) => Ok(Transport::WebSocket(WebSocketTransport::spawn(url, policy)?)),
        (None, None) => Err(TransportError::NoServer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_url_and_no_replay_is_an_error() {
        let err = open_transport(None, None, false, ReconnectPolicy::default()).unwrap_err();
        assert!(matches!(err, TransportError::NoServer));
    }

    #[test]
    fn replay_wins_over_url() {
        let path = std::env::temp_dir().join("admin_console_replay_wins.jsonl");
        std::fs::write(&path, "").unwrap();

        let transport = open_transport(
            Some("ws://127.0.0.1:1"),
            Some(path.clone()),
            false,
            ReconnectPolicy::default(),
        );
        let _ = std::fs::remove_file(&path);

        let transport = transport.unwrap();
        assert!(!transport.is_live());
    }

    #[test]
    fn invalid_url_is_reported() {
        let err = open_transport(Some("localhost:8080"), None, false, ReconnectPolicy::default())
            .unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }
}
