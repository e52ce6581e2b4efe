//! Application state and transitions.
//!
//! `AppState` is the root state type. It owns the console core (stream
//! buffer, classifier, input router, connection state, roster and selection)
//! and exposes a read-only view plus a small set of callbacks to the
//! presentation layer. Every transition runs to completion on one event.

use crate::classifier::{ClassifierConfig, LineClassifier};
use crate::model::{
    ConsoleInput, DecoratedLine, KeyAction, Player, PlayerId, RosterSnapshot, ServerSnapshot,
    TransportEvent, User,
};
use crate::notifier::Notifier;
use crate::state::connection::ConnectionState;
use crate::state::input_line::InputLine;
use crate::state::input_router::{
    EmptyInputPolicy, InputRouter, OutboundSink, DEFAULT_COMMAND_MARKER, DEFAULT_HISTORY_SIZE,
};
use crate::state::roster_store::RosterStore;
use crate::state::selection::SelectionController;
use crate::state::stream_buffer::{StreamBuffer, DEFAULT_MAX_LINES};
use crate::state::viewport::ConsoleViewport;
use std::collections::VecDeque;

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;

// ===== Settings =====

/// Explicit construction-time configuration of the console core.
#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    /// Retained console lines.
    pub max_lines: usize,
    /// Mention patterns and markup rules.
    pub classifier: ClassifierConfig,
    /// Leading character that marks a command.
    pub command_marker: char,
    /// Handling of empty operator input.
    pub empty_input: EmptyInputPolicy,
    /// Input recall history length.
    pub history_size: usize,
    /// Initial mute flag.
    pub muted: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            classifier: ClassifierConfig::default(),
            command_marker: DEFAULT_COMMAND_MARKER,
            empty_input: EmptyInputPolicy::default(),
            history_size: DEFAULT_HISTORY_SIZE,
            muted: false,
        }
    }
}

// ===== FocusPane =====

/// Which pane receives navigation keys.
///
/// Typing always goes to the input line. Up/Down recall input history when
/// the console has focus and move the roster cursor when the roster has it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Console and input line.
    #[default]
    Console,
    /// Player roster.
    Roster,
}

// ===== AppState =====

/// Root console state.
///
/// # Invariants
///
/// - The stream buffer never holds more than `max_lines` lines.
/// - Console lines are appended only while connected, in arrival order.
/// - The selection, if any, names a player of the current roster.
/// - The detail panel is open exactly when a player is selected.
#[derive(Debug)]
pub struct AppState {
    connection: ConnectionState,
    buffer: StreamBuffer,
    viewport: ConsoleViewport,
    classifier: LineClassifier,
    router: InputRouter,
    input: InputLine,
    roster: RosterStore,
    selection: SelectionController,
    /// Index into the player list, highlighted when the roster has focus
    roster_cursor: usize,
    focus: FocusPane,
    muted: bool,
    should_quit: bool,
    /// Lines received while not connected
    dropped_lines: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ConsoleSettings::default())
    }
}

impl AppState {
    /// Create state from explicit settings.
    pub fn new(settings: ConsoleSettings) -> Self {
        Self {
            connection: ConnectionState::default(),
            buffer: StreamBuffer::new(settings.max_lines),
            viewport: ConsoleViewport::new(),
            classifier: LineClassifier::new(settings.classifier),
            router: InputRouter::new(
                settings.command_marker,
                settings.empty_input,
                settings.history_size,
            ),
            input: InputLine::new(),
            roster: RosterStore::new(),
            selection: SelectionController::new(),
            roster_cursor: 0,
            focus: FocusPane::default(),
            muted: settings.muted,
            should_quit: false,
            dropped_lines: 0,
        }
    }

    // ----- read-only view -----

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    /// Retained console lines, oldest first.
    pub fn lines(&self) -> &VecDeque<DecoratedLine> {
        self.buffer.lines()
    }

    /// The stream buffer.
    pub fn buffer(&self) -> &StreamBuffer {
        &self.buffer
    }

    /// Console scroll state.
    pub fn viewport(&self) -> &ConsoleViewport {
        &self.viewport
    }

    /// Latest server figures.
    pub fn server_snapshot(&self) -> Option<&ServerSnapshot> {
        self.roster.status()
    }

    /// Connected players.
    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    /// Registered users.
    pub fn users(&self) -> &[User] {
        self.roster.users()
    }

    /// The selected player, if any.
    pub fn selected_player(&self) -> Option<&Player> {
        self.selection.selected().and_then(|id| self.roster.player(id))
    }

    /// Whether the detail panel is shown.
    pub fn detail_open(&self) -> bool {
        self.selected_player().is_some()
    }

    /// Whether mention notifications are muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// The operator input line.
    pub fn input(&self) -> &InputLine {
        &self.input
    }

    /// Whether operator input is accepted.
    pub fn input_enabled(&self) -> bool {
        self.connection.accepts_input()
    }

    /// Pane receiving navigation keys.
    pub fn focus(&self) -> FocusPane {
        self.focus
    }

    /// Roster cursor position.
    pub fn roster_cursor(&self) -> usize {
        self.roster_cursor
    }

    /// Whether the operator asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Lines discarded because they arrived while not connected.
    pub fn dropped_lines(&self) -> u64 {
        self.dropped_lines
    }

    // ----- transport events -----

    /// Apply one inbound transport event.
    pub fn apply_event(&mut self, event: TransportEvent, notifier: &mut dyn Notifier) {
        match event {
            TransportEvent::Connecting => self.set_connection(ConnectionState::Connecting),
            TransportEvent::Connected => self.set_connection(ConnectionState::Connected),
            TransportEvent::Disconnected { reason } => {
                tracing::info!(%reason, "Connection lost");
                self.set_connection(ConnectionState::Disconnected);
            }
            TransportEvent::ConsoleLines(lines) => {
                for line in lines {
                    self.ingest_line(&line, notifier);
                }
            }
            TransportEvent::ServerStatus(snapshot) => self.apply_snapshot(snapshot),
        }
    }

    fn set_connection(&mut self, to: ConnectionState) {
        match self.connection.transition(to) {
            Ok(next) => {
                if next != self.connection {
                    tracing::debug!(from = %self.connection, to = %next, "Connection state changed");
                }
                self.connection = next;
            }
            Err(e) => tracing::warn!(error = %e, "Ignoring connection event"),
        }
    }

    /// Classify and append one raw console line.
    ///
    /// Lines are only accepted while connected. A mention fires the notifier
    /// unless muted; the line is appended and flagged either way.
    pub fn ingest_line(&mut self, raw: &str, notifier: &mut dyn Notifier) {
        if !self.connection.accepts_input() {
            self.dropped_lines += 1;
            tracing::trace!(state = %self.connection, "Dropping console line received while not connected");
            return;
        }

        let line = self.classifier.classify(raw);
        if line.is_mention() && !self.muted {
            notifier.notify_mention(&line);
        }
        let outcome = self.buffer.push(line, &self.viewport);
        self.viewport.after_append(outcome, self.buffer.len());
    }

    /// Replace the roster and reconcile the selection against it.
    pub fn apply_snapshot(&mut self, snapshot: RosterSnapshot) {
        let was_at_bottom = self.viewport.is_at_bottom();
        self.roster.replace(snapshot);
        if self.selection.reconcile(&self.roster) && was_at_bottom {
            self.viewport.pin_to_bottom();
        }
        self.roster_cursor = self
            .roster_cursor
            .min(self.roster.players().len().saturating_sub(1));
    }

    // ----- operator callbacks -----

    /// Route and send `text`. Returns what was sent.
    ///
    /// Nothing is sent while not connected.
    pub fn submit_text(&mut self, text: &str, sink: &mut dyn OutboundSink) -> Option<ConsoleInput> {
        if !self.input_enabled() {
            tracing::debug!(state = %self.connection, "Input submitted while not connected");
            return None;
        }
        self.router.submit(text, sink)
    }

    /// Submit the input line; it is cleared when something was sent.
    pub fn submit_input(&mut self, sink: &mut dyn OutboundSink) -> Option<ConsoleInput> {
        let text = self.input.text().to_string();
        let sent = self.submit_text(&text, sink);
        if sent.is_some() {
            self.input.clear();
        }
        sent
    }

    /// Toggle selection of a connected player.
    ///
    /// Returns whether the player is selected afterwards. Ids not in the
    /// roster are ignored.
    pub fn select_player(&mut self, id: &PlayerId) -> bool {
        let Some(index) = self.players().iter().position(|p| &p.id == id) else {
            tracing::debug!(player = %id, "Ignoring selection of unknown player");
            return false;
        };
        let was_at_bottom = self.viewport.is_at_bottom();
        self.roster_cursor = index;
        let selected = self.selection.toggle(id.clone()).is_some();
        if was_at_bottom {
            self.viewport.pin_to_bottom();
        }
        selected
    }

    /// Close the detail panel by clearing the selection.
    pub fn close_detail(&mut self) {
        let was_at_bottom = self.viewport.is_at_bottom();
        self.selection.clear();
        if was_at_bottom {
            self.viewport.pin_to_bottom();
        }
    }

    /// Flip the mute flag.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        tracing::debug!(muted = self.muted, "Mute toggled");
    }

    /// Type a character into the input line.
    pub fn insert_char(&mut self, c: char) {
        if self.input_enabled() {
            self.input.insert(c);
        }
    }

    /// Report the console pane height from the last layout.
    pub fn set_console_height(&mut self, rows: usize) {
        self.viewport.set_viewport_height(rows);
    }

    /// Scroll the console by `delta` rows; negative is up.
    pub fn scroll_console(&mut self, delta: isize) {
        if delta < 0 {
            self.viewport.scroll_up(delta.unsigned_abs());
        } else {
            self.viewport.scroll_down(delta.unsigned_abs());
        }
    }

    /// Handle a bound key action.
    pub fn handle_action(&mut self, action: KeyAction, sink: &mut dyn OutboundSink) {
        match action {
            KeyAction::Confirm => match self.focus {
                FocusPane::Console => {
                    self.submit_input(sink);
                }
                FocusPane::Roster => self.select_at_cursor(),
            },
            KeyAction::MoveUp => match self.focus {
                FocusPane::Console => self.recall_previous(),
                FocusPane::Roster => self.roster_cursor = self.roster_cursor.saturating_sub(1),
            },
            KeyAction::MoveDown => match self.focus {
                FocusPane::Console => self.recall_next(),
                FocusPane::Roster => {
                    let last = self.players().len().saturating_sub(1);
                    self.roster_cursor = (self.roster_cursor + 1).min(last);
                }
            },
            KeyAction::CursorLeft => self.input.move_left(),
            KeyAction::CursorRight => self.input.move_right(),
            KeyAction::CursorHome => self.input.move_home(),
            KeyAction::CursorEnd => self.input.move_end(),
            KeyAction::DeleteBackward => self.input.delete_backward(),
            KeyAction::DeleteForward => self.input.delete_forward(),
            KeyAction::ClearInput => {
                self.input.clear();
                self.router.history_mut().reset_navigation();
            }
            KeyAction::ScrollUp => self.viewport.scroll_up(1),
            KeyAction::ScrollDown => self.viewport.scroll_down(1),
            KeyAction::PageUp => self.viewport.page_up(),
            KeyAction::PageDown => self.viewport.page_down(),
            KeyAction::ScrollToTop => self.viewport.scroll_to_top(),
            KeyAction::ScrollToBottom => self.viewport.pin_to_bottom(),
            KeyAction::CycleFocus => {
                self.focus = match self.focus {
                    FocusPane::Console => FocusPane::Roster,
                    FocusPane::Roster => FocusPane::Console,
                }
            }
            KeyAction::CloseDetail => self.close_detail(),
            KeyAction::ToggleMute => self.toggle_mute(),
            KeyAction::Quit => self.should_quit = true,
        }
    }

    fn select_at_cursor(&mut self) {
        if let Some(id) = self.players().get(self.roster_cursor).map(|p| p.id.clone()) {
            self.select_player(&id);
        }
    }

    fn recall_previous(&mut self) {
        let recalled = self
            .router
            .history_mut()
            .previous(self.input.text())
            .map(str::to_string);
        if let Some(text) = recalled {
            self.input.set(&text);
        }
    }

    fn recall_next(&mut self) {
        let recalled = self.router.history_mut().next().map(str::to_string);
        if let Some(text) = recalled {
            self.input.set(&text);
        }
    }
}
