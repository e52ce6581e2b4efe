//! Error types for the admin console.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose
//! via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all startup and runtime failures
//!   - [`crate::config::ConfigError`] - Config file read/parse failures, invalid patterns
//!   - [`crate::logging::LoggingError`] - Tracing subscriber setup failures
//!   - [`TransportError`] - Failures establishing the transport (bad URL, replay file)
//!   - `std::io::Error` - Terminal/TUI rendering failures
//! - [`ProtocolError`] - A single inbound frame could not be decoded
//! - [`SnapshotError`] - A `server-status` payload decoded but is not a valid roster
//!
//! # Error Recovery Strategy
//!
//! Frame-level errors are **non-fatal**: a malformed frame is logged and
//! dropped, and a malformed snapshot leaves the last-known-good roster in
//! place. Connection loss is not an error at all from the UI's point of view:
//! it surfaces only as a connection state transition and the transport
//! reconnects on its own.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The transport could not be started.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Terminal or TUI rendering error.
    ///
    /// This is a **fatal error** - without a working terminal, the TUI cannot
    /// function. The terminal is restored before the error is reported.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors starting a transport.
///
/// Runtime connection failures are not represented here; they are retried by
/// the transport and reported as connection state transitions.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No server URL was configured and no replay file was given.
    #[error("No server: provide a server URL, set ADMIN_CONSOLE_URL, or pass --replay <file>")]
    NoServer,

    /// The server URL is not a plain `ws://` URL.
    #[error("Invalid server URL {url}: expected ws://host[:port][/path]")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },

    /// The replay file does not exist.
    #[error("Replay file not found: {path}")]
    ReplayNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// I/O failure while starting the transport (thread spawn, runtime, file open).
    #[error("Transport IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors decoding a single inbound frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The frame is not a `{"event": ..., "data": ...}` JSON object.
    #[error("Invalid frame: {message}")]
    InvalidFrame {
        /// Parser error message.
        message: String,
    },

    /// A `console` frame carried neither `line` nor `batch`.
    #[error("Malformed console payload: {message}")]
    MalformedConsole {
        /// Parser error message.
        message: String,
    },

    /// A `server-status` frame is missing required fields or has wrong types.
    #[error("Malformed server-status payload: {message}")]
    MalformedSnapshot {
        /// Parser error message.
        message: String,
    },

    /// A `server-status` frame decoded but failed roster validation.
    #[error("Rejected server-status payload: {0}")]
    InvalidRoster(#[from] SnapshotError),
}

/// Semantic validation failures of a decoded `server-status` payload.
///
/// Any of these rejects the whole snapshot; the previous roster is retained.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// A player or user entry has an empty uuid.
    #[error("{list} entry {index} has an empty uuid")]
    EmptyId {
        /// Which list the entry came from ("players" or "users").
        list: &'static str,
        /// Position of the entry in the list.
        index: usize,
    },

    /// The same uuid appears twice in one list.
    #[error("duplicate uuid {id} in {list}")]
    DuplicateId {
        /// Which list the duplicate is in.
        list: &'static str,
        /// The duplicated uuid.
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_converts_into_app_error() {
        let err: AppError = TransportError::NoServer.into();
        assert!(matches!(err, AppError::Transport(TransportError::NoServer)));
    }

    #[test]
    fn io_error_converts_into_app_error() {
        let err: AppError = std::io::Error::other("boom").into();
        assert!(matches!(err, AppError::Terminal(_)));
    }

    #[test]
    fn no_server_message_mentions_replay() {
        let msg = TransportError::NoServer.to_string();
        assert!(msg.contains("--replay"), "got: {msg}");
    }

    #[test]
    fn snapshot_error_messages_carry_context() {
        let err = SnapshotError::DuplicateId {
            list: "players",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate uuid abc in players");

        let err = SnapshotError::EmptyId {
            list: "users",
            index: 3,
        };
        assert_eq!(err.to_string(), "users entry 3 has an empty uuid");
    }
}
