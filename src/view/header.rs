//! Header bar: connection, server figures and the mute toggle.

use crate::model::Metric;
use crate::state::AppState;
use crate::view::connection_indicator::ConnectionIndicator;
use crate::view::styles::ConsoleStyles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Hint for the mute toggle, naming what pressing it would do.
pub fn mute_hint(muted: bool) -> &'static str {
    if muted {
        "Unmute notification sounds"
    } else {
        "Mute notification sounds"
    }
}

fn metric(value: Option<&Metric>) -> String {
    value.map_or_else(|| "-".to_string(), Metric::to_string)
}

/// `Players n/max  TPS t  Load l`, with `-` before the first snapshot.
pub fn server_figures(state: &AppState) -> String {
    let status = state.server_snapshot();
    format!(
        "Players {}/{}  TPS {}  Load {}",
        metric(status.map(|s| &s.num_players)),
        metric(status.map(|s| &s.max_players)),
        metric(status.map(|s| &s.tps)),
        metric(status.map(|s| &s.load)),
    )
}

/// Header line contents.
pub fn header_line(state: &AppState, blink_on: bool, styles: &ConsoleStyles) -> Line<'static> {
    let mut spans = vec![
        Span::raw(" "),
        ConnectionIndicator::new(state.connection_state(), blink_on).render(styles),
        Span::raw("  "),
        Span::raw(server_figures(state)),
        Span::raw("  "),
        Span::styled(format!("[F2] {}", mute_hint(state.is_muted())), styles.dim()),
    ];
    if state.dropped_lines() > 0 {
        spans.push(Span::styled(
            format!("  {} lines dropped while offline", state.dropped_lines()),
            styles.dim(),
        ));
    }
    Line::from(spans)
}

/// Render the header into `area`.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    blink_on: bool,
    styles: &ConsoleStyles,
) {
    frame.render_widget(Paragraph::new(header_line(state, blink_on, styles)), area);
}
