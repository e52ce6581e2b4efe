//! Offline replay of recorded frames.
//!
//! A replay file holds one wire frame per line, exactly as the server sends
//! them. The replay behaves like a connection that opens immediately,
//! delivers the recorded frames a few at a time and then closes. Operator
//! input is logged and kept, never sent anywhere.

use super::protocol::decode_frame;
use crate::model::{ConsoleInput, TransportError, TransportEvent};
use crate::state::OutboundSink;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Frames decoded per poll, so a large recording streams in over several
/// UI ticks instead of all at once.
pub const DEFAULT_FRAMES_PER_POLL: usize = 64;

/// Most recent inputs kept for inspection; older ones are only counted.
pub const SENT_LOG_CAPACITY: usize = 100;

/// Transport reading recorded frames from a file or any reader.
pub struct ReplayTransport {
    reader: Box<dyn BufRead + Send>,
    frames_per_poll: usize,
    hold_open: bool,
    started: bool,
    exhausted: bool,
    complete: bool,
    sent: VecDeque<ConsoleInput>,
    sent_total: u64,
}

impl std::fmt::Debug for ReplayTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayTransport")
            .field("started", &self.started)
            .field("complete", &self.complete)
            .field("sent_total", &self.sent_total)
            .finish()
    }
}

impl ReplayTransport {
    /// Open a recording.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ReplayNotFound` if the file does not exist and
    /// `TransportError::Io` if it cannot be opened.
    pub fn open(path: &Path) -> Result<Self, TransportError> {
        if !path.exists() {
            return Err(TransportError::ReplayNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Replay frames from any reader.
    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            frames_per_poll: DEFAULT_FRAMES_PER_POLL,
            hold_open: false,
            started: false,
            exhausted: false,
            complete: false,
            sent: VecDeque::new(),
            sent_total: 0,
        }
    }

    /// Change how many frames each poll decodes (at least one).
    pub fn with_frames_per_poll(mut self, frames: usize) -> Self {
        self.frames_per_poll = frames.max(1);
        self
    }

    /// Stay connected after the last frame instead of disconnecting.
    ///
    /// Input keeps being accepted and recorded.
    pub fn hold_open(mut self, hold: bool) -> Self {
        self.hold_open = hold;
        self
    }

    /// Next batch of events.
    ///
    /// The first poll opens the connection. Once the recording is exhausted
    /// a single `Disconnected` is emitted and later polls return nothing,
    /// unless the replay is held open.
    pub fn poll(&mut self) -> Vec<TransportEvent> {
        let mut events = Vec::new();
        if self.complete {
            return events;
        }
        if !self.started {
            self.started = true;
            events.push(TransportEvent::Connecting);
            events.push(TransportEvent::Connected);
        }

        let mut frames = 0;
        let mut buf = String::new();
        while frames < self.frames_per_poll {
            buf.clear();
            match self.reader.read_line(&mut buf) {
                Ok(0) if self.hold_open => {
                    if !self.exhausted {
                        tracing::info!("Replay exhausted; holding connection open");
                        self.exhausted = true;
                    }
                    break;
                }
                Ok(0) => {
                    self.finish(&mut events, "replay finished".to_string());
                    break;
                }
                Ok(_) => {
                    let frame = buf.trim();
                    if frame.is_empty() {
                        continue;
                    }
                    frames += 1;
                    match decode_frame(frame) {
                        Ok(Some(event)) => events.push(event),
                        Ok(None) => {}
                        Err(e) => tracing::warn!(error = %e, "Skipping recorded frame"),
                    }
                }
                Err(e) => {
                    self.finish(&mut events, format!("replay read error: {e}"));
                    break;
                }
            }
        }
        events
    }

    fn finish(&mut self, events: &mut Vec<TransportEvent>, reason: String) {
        tracing::info!(%reason, "Replay complete");
        self.complete = true;
        events.push(TransportEvent::Disconnected { reason });
    }

    /// Whether the recording is exhausted.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The most recent input submitted during the replay, oldest first.
    pub fn sent(&self) -> &VecDeque<ConsoleInput> {
        &self.sent
    }

    /// Inputs submitted over the whole replay.
    pub fn sent_total(&self) -> u64 {
        self.sent_total
    }
}

impl OutboundSink for ReplayTransport {
    fn send(&mut self, input: ConsoleInput) {
        tracing::info!(text = input.text(), "Replay mode; input not sent");
        self.sent_total += 1;
        if self.sent.len() == SENT_LOG_CAPACITY {
            self.sent.pop_front();
        }
        self.sent.push_back(input);
    }
}
