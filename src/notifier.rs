//! Mention notifications.
//!
//! The console rings the terminal bell when a mention arrives and the
//! operator has not muted notifications.

use crate::model::DecoratedLine;
use std::io::Write;

/// Side effect fired for each unmuted mention.
pub trait Notifier {
    /// A mention line was appended.
    fn notify_mention(&mut self, line: &DecoratedLine);
}

/// Rings the terminal bell on stdout.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify_mention(&mut self, _line: &DecoratedLine) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            tracing::warn!(error = %e, "Failed to ring terminal bell");
        }
    }
}

/// Counts notifications instead of making noise.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    /// Texts of the lines that triggered a notification.
    pub notified: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn notify_mention(&mut self, line: &DecoratedLine) {
        self.notified.push(line.text().to_string());
    }
}
