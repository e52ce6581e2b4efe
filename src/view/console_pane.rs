//! Console pane: the visible window of the stream buffer.

use crate::model::DecoratedLine;
use crate::state::AppState;
use crate::view::styles::ConsoleStyles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Convert a decorated line into styled spans.
pub fn console_line<'a>(line: &'a DecoratedLine, styles: &ConsoleStyles) -> Line<'a> {
    let spans: Vec<Span<'a>> = line
        .fragments()
        .into_iter()
        .map(|fragment| match fragment.highlight {
            Some(h) => Span::styled(fragment.text, styles.highlight(h)),
            None => Span::raw(fragment.text),
        })
        .collect();

    let rendered = Line::from(spans);
    if line.is_mention() {
        rendered.style(styles.mention())
    } else {
        rendered
    }
}

/// Title of the console block; flags a paused view.
pub fn console_title(state: &AppState) -> String {
    if state.viewport().is_at_bottom() {
        " Console ".to_string()
    } else {
        let hidden = state.lines().len().saturating_sub(state.viewport().visible_range().end);
        format!(" Console (paused, {hidden} newer) ")
    }
}

/// Render the console into `area`.
pub fn render_console(frame: &mut Frame, area: Rect, state: &AppState, styles: &ConsoleStyles) {
    let range = state.viewport().visible_range();
    let lines: Vec<Line> = state
        .lines()
        .range(range)
        .map(|line| console_line(line, styles))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(console_title(state));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
