//! Acceptance Test Harness for TUI testing
//!
//! Wraps `TuiApp<TestBackend>` fed by an in-memory replay, with methods for
//! simulating operator interactions and inspecting the rendered screen.

use crate::model::{
    ConsoleInput, DecoratedLine, Metric, Player, PlayerId, Position, RosterSnapshot,
    ServerSnapshot,
};
use crate::notifier::Notifier;
use crate::state::{AppState, ConsoleSettings};
use crate::transport::{ReplayTransport, Transport};
use crate::view::{ScreenAreas, TuiApp, TuiError, ViewSettings};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Trailing whitespace is trimmed per row and empty rows are removed.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

// ===== Fixtures =====

/// A player with predictable fields.
pub fn player(uuid: &str, username: &str) -> Player {
    Player {
        id: PlayerId::new(uuid).expect("fixture id"),
        username: username.to_string(),
        nickname: None,
        nickname_ansi: None,
        rank: 1,
        position: Position {
            world: "world".to_string(),
            x: 1.0,
            y: 64.0,
            z: -1.0,
        },
        health: 20.0,
        time_spent_minutes: 90,
        address: "10.0.0.1".to_string(),
        titles: Vec::new(),
        donator: false,
    }
}

/// A snapshot of the given `(uuid, username)` players.
pub fn roster(players: &[(&str, &str)]) -> RosterSnapshot {
    RosterSnapshot {
        status: ServerSnapshot {
            num_players: Metric::Number(players.len() as f64),
            max_players: Metric::Number(20.0),
            tps: Metric::Number(20.0),
            load: Metric::Text("3%".to_string()),
            received_at: chrono::Utc::now(),
        },
        players: players.iter().map(|(id, name)| player(id, name)).collect(),
        users: Vec::new(),
    }
}

/// A console frame as the server sends it.
pub fn console_frame(line: &str) -> String {
    serde_json::json!({"event": "console", "data": {"line": line}}).to_string()
}

/// A server-status frame for the given `(uuid, username)` players.
pub fn status_frame(players: &[(&str, &str)]) -> String {
    let players: Vec<_> = players
        .iter()
        .enumerate()
        .map(|(i, (uuid, username))| {
            serde_json::json!({
                "uuid": uuid, "username": username, "rank": i + 1,
                "world": "world", "x": 0, "y": 64, "z": 0,
                "health": 20.0, "time_spent": 5, "address": "10.0.0.1",
                "titles": []
            })
        })
        .collect();
    serde_json::json!({
        "event": "server-status",
        "data": {
            "numPlayers": players.len(), "maxPlayers": 20, "tps": 20, "load": "3%",
            "players": players, "users": []
        }
    })
    .to_string()
}

/// Notifier whose recordings outlive the app that owns it.
#[derive(Debug, Clone, Default)]
pub struct SharedNotifier(pub Rc<RefCell<Vec<String>>>);

impl Notifier for SharedNotifier {
    fn notify_mention(&mut self, line: &DecoratedLine) {
        self.0.borrow_mut().push(line.text().to_string());
    }
}

// ===== Harness =====

/// Test harness for acceptance testing
pub struct ConsoleTestHarness {
    app: TuiApp<TestBackend>,
    bells: SharedNotifier,
}

impl ConsoleTestHarness {
    /// Harness replaying `frames` (one per line) on a 100x30 terminal.
    pub fn new(frames: &[String]) -> Result<Self, TuiError> {
        Self::with_settings(frames, ConsoleSettings::default(), ViewSettings::default(), 100, 30)
    }

    /// Harness with explicit settings and terminal size.
    pub fn with_settings(
        frames: &[String],
        settings: ConsoleSettings,
        view: ViewSettings,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let data = frames.iter().map(|f| format!("{f}\n")).collect::<String>();
        let transport = Transport::Replay(ReplayTransport::from_reader(Cursor::new(data)).hold_open(true));
        let bells = SharedNotifier::default();
        let app = TuiApp::new_for_test(
            terminal,
            AppState::new(settings),
            transport,
            Box::new(bells.clone()),
            view,
        );
        Ok(Self { app, bells })
    }

    /// Deliver pending frames, then render.
    pub fn tick(&mut self) -> Result<(), TuiError> {
        self.app.poll_transport_test();
        self.app.render_test()
    }

    /// Press a key without modifiers.
    pub fn press(&mut self, code: KeyCode) -> bool {
        self.press_with(code, KeyModifiers::NONE)
    }

    /// Press a key with modifiers. Returns whether the app quits.
    pub fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.app.handle_key_test(KeyEvent::new(code, modifiers))
    }

    /// Type text into the input line.
    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Left-click a cell.
    pub fn click(&mut self, column: u16, row: u16) {
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Scroll the mouse wheel.
    pub fn wheel(&mut self, up: bool) {
        self.app.handle_mouse_test(MouseEvent {
            kind: if up {
                MouseEventKind::ScrollUp
            } else {
                MouseEventKind::ScrollDown
            },
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// The console state.
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Areas of the last render.
    pub fn areas(&self) -> Option<ScreenAreas> {
        self.app.last_areas()
    }

    /// Input sent to the (replay) server.
    pub fn sent(&self) -> Vec<ConsoleInput> {
        self.app
            .transport()
            .as_replay()
            .map(|r| r.sent().iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of bells rung.
    pub fn bells(&self) -> usize {
        self.bells.0.borrow().len()
    }

    /// The screen as text.
    pub fn screen(&self) -> String {
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
