//! TUI rendering and terminal management (impure shell)

pub mod connection_indicator;
pub mod console_pane;
pub mod constants;
pub mod detail_panel;
pub mod header;
pub mod input_bar;
pub mod layout;
pub mod roster_pane;
pub mod styles;

pub use connection_indicator::ConnectionIndicator;
pub use layout::{calculate_layout, render_layout, ScreenAreas};
pub use styles::{ColorConfig, ConsoleStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::AppError;
use crate::notifier::{Notifier, TerminalBell};
use crate::state::AppState;
use crate::transport::Transport;
use crate::view::constants::MOUSE_SCROLL_ROWS;
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Presentation settings that do not affect the console core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSettings {
    /// Color output.
    pub color: ColorConfig,
    /// Website base URL for profile and IP links.
    pub web_base_url: Option<String>,
    /// Server id for profile links.
    pub server_id: Option<String>,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    transport: Transport,
    notifier: Box<dyn Notifier>,
    key_bindings: KeyBindings,
    settings: ViewSettings,
    /// Phase of the connecting indicator
    blink_on: bool,
    /// Areas of the last frame (for mouse hit testing)
    last_areas: Option<ScreenAreas>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        app_state: AppState,
        transport: Transport,
        settings: ViewSettings,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            transport,
            notifier: Box::new(TerminalBell),
            key_bindings: KeyBindings::default(),
            settings,
            blink_on: true,
            last_areas: None,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the operator quits. Redraws on input, on transport
    /// events and on blink ticks while connecting; idles otherwise.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Upper bound on transport latency
        const POLL_INTERVAL: Duration = Duration::from_millis(50);
        // Connecting indicator blink period
        const BLINK_INTERVAL: Duration = Duration::from_millis(500);

        self.draw()?;
        let mut last_blink = Instant::now();

        loop {
            let mut dirty = false;

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        dirty = true;
                    }
                    _ => {}
                }
            }

            dirty |= self.poll_transport();

            if last_blink.elapsed() >= BLINK_INTERVAL {
                last_blink = Instant::now();
                if self.app_state.connection_state() == crate::state::ConnectionState::Connecting
                {
                    self.blink_on = !self.blink_on;
                    dirty = true;
                }
            }

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Apply all pending transport events in arrival order.
    ///
    /// Returns whether anything arrived.
    fn poll_transport(&mut self) -> bool {
        let events = self.transport.poll();
        if events.is_empty() {
            return false;
        }
        for event in events {
            self.app_state.apply_event(event, self.notifier.as_mut());
        }
        true
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        if let Some(action) = self.key_bindings.get(key) {
            self.app_state.handle_action(action, &mut self.transport);
        } else if let event::KeyCode::Char(c) = key.code {
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                self.app_state.insert_char(c);
            }
        }

        self.app_state.should_quit()
    }

    /// Handle a single mouse event
    ///
    /// The wheel scrolls the console; a left click on a player row toggles
    /// that player's selection.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.app_state.scroll_console(-MOUSE_SCROLL_ROWS),
            MouseEventKind::ScrollDown => self.app_state.scroll_console(MOUSE_SCROLL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(areas) = self.last_areas else {
                    return;
                };
                if let Some(id) =
                    roster_pane::player_at(areas.players, mouse.column, mouse.row, &self.app_state)
                {
                    self.app_state.select_player(&id);
                }
            }
            _ => {}
        }
    }

    /// Render the current frame
    ///
    /// Lays out the panes first so the console height is known before the
    /// visible range is read.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        let areas = calculate_layout(frame_area, &self.app_state, &self.settings);
        self.app_state.set_console_height(areas.console_rows());
        self.last_areas = Some(areas);

        self.terminal.draw(|frame| {
            render_layout(
                frame,
                &self.app_state,
                &areas,
                &self.settings,
                self.blink_on,
            );
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        transport: Transport,
        notifier: Box<dyn Notifier>,
        settings: ViewSettings,
    ) -> Self {
        Self {
            terminal,
            app_state,
            transport,
            notifier,
            key_bindings: KeyBindings::default(),
            settings,
            blink_on: true,
            last_areas: None,
        }
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    pub(crate) fn poll_transport_test(&mut self) -> bool {
        self.poll_transport()
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn last_areas(&self) -> Option<ScreenAreas> {
        self.last_areas
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI against a transport
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_transport(
    app_state: AppState,
    transport: Transport,
    settings: ViewSettings,
) -> Result<(), TuiError> {
    let live = transport.is_live();
    let mut app = TuiApp::new(app_state, transport, settings)?;
    debug!(live, "Starting event loop");

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_app_tests.rs"]
mod tests;
