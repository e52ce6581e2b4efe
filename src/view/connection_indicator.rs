//! Connection indicator widget for the header bar.
//!
//! - Green when connected
//! - Blinking yellow while connecting
//! - Red when disconnected

use crate::state::ConnectionState;
use crate::view::styles::ConsoleStyles;
use ratatui::text::Span;

/// Indicator that renders from the connection state and blink phase.
///
/// The widget is stateless. The blink phase is passed in rather than kept
/// here, so the timer that drives it lives with the event loop.
#[derive(Debug, Clone)]
pub struct ConnectionIndicator {
    state: ConnectionState,
    blink_on: bool,
}

impl ConnectionIndicator {
    /// Create an indicator for `state`.
    ///
    /// `blink_on` only matters while connecting.
    pub fn new(state: ConnectionState, blink_on: bool) -> Self {
        Self { state, blink_on }
    }

    /// Indicator text, padded so its width does not depend on the blink phase.
    pub fn text(&self) -> String {
        let label = format!("[{}]", self.state.label().to_uppercase());
        match self.state {
            ConnectionState::Connecting if !self.blink_on => " ".repeat(label.len()),
            _ => label,
        }
    }

    /// Render the indicator as a ratatui Span.
    pub fn render(&self, styles: &ConsoleStyles) -> Span<'static> {
        Span::styled(self.text(), styles.connection(self.state))
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "connection_indicator_tests.rs"]
mod tests;
