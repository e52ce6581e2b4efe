//! Screen layout rendering.
//!
//! Pure layout logic: `calculate_layout` splits the frame, `render_layout`
//! draws every pane into the computed areas.
//!
//! ```text
//! +------------------------------------------------+
//! | header                                         |
//! +------------------------------+-----------------+
//! | console                      | players         |
//! |                              |                 |
//! +------------------------------+                 |
//! | player detail (if selected)  +-----------------+
//! |                              | users           |
//! +------------------------------+-----------------+
//! | input                                          |
//! +------------------------------------------------+
//! ```

use crate::state::AppState;
use crate::view::constants::{
    HEADER_HEIGHT, INPUT_HEIGHT, MIN_CONSOLE_HEIGHT, PLAYER_LIST_HEIGHT_PERCENT,
    ROSTER_WIDTH_PERCENT,
};
use crate::view::styles::ConsoleStyles;
use crate::view::{
    console_pane, detail_panel, header, input_bar, roster_pane, ViewSettings,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Areas of every pane for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Header bar.
    pub header: Rect,
    /// Console pane, borders included.
    pub console: Rect,
    /// Detail panel, when a player is selected.
    pub detail: Option<Rect>,
    /// Player list.
    pub players: Rect,
    /// User list.
    pub users: Rect,
    /// Input line.
    pub input: Rect,
}

impl ScreenAreas {
    /// Rows of console text that fit inside the console borders.
    pub fn console_rows(&self) -> usize {
        usize::from(self.console.height.saturating_sub(2))
    }
}

/// Split `area` into panes for the current state.
pub fn calculate_layout(area: Rect, state: &AppState, settings: &ViewSettings) -> ScreenAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100 - ROSTER_WIDTH_PERCENT),
            Constraint::Percentage(ROSTER_WIDTH_PERCENT),
        ])
        .split(vertical[1]);

    let (console, detail) = match state.selected_player() {
        Some(player) => {
            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(MIN_CONSOLE_HEIGHT),
                    Constraint::Length(detail_panel::panel_height(player, settings)),
                ])
                .split(columns[0]);
            (left[0], Some(left[1]))
        }
        None => (columns[0], None),
    };

    let roster = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(PLAYER_LIST_HEIGHT_PERCENT),
            Constraint::Percentage(100 - PLAYER_LIST_HEIGHT_PERCENT),
        ])
        .split(columns[1]);

    ScreenAreas {
        header: vertical[0],
        console,
        detail,
        players: roster[0],
        users: roster[1],
        input: vertical[2],
    }
}

/// Render every pane.
///
/// `areas` must come from [`calculate_layout`] for the same state, after
/// the console height has been reported to the state.
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    areas: &ScreenAreas,
    settings: &ViewSettings,
    blink_on: bool,
) {
    let styles = ConsoleStyles::with_color_config(settings.color);

    header::render_header(frame, areas.header, state, blink_on, &styles);
    console_pane::render_console(frame, areas.console, state, &styles);

    if let (Some(area), Some(player)) = (areas.detail, state.selected_player()) {
        detail_panel::render_detail_panel(frame, area, player, settings, &styles);
    }

    roster_pane::render_players(frame, areas.players, state, &styles);
    roster_pane::render_users(frame, areas.users, state, &styles);
    input_bar::render_input(frame, areas.input, state, &styles);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
