//! Operator input line.

use crate::state::{AppState, FocusPane};
use crate::view::constants::INPUT_PROMPT;
use crate::view::styles::ConsoleStyles;
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Placeholder shown while input is refused.
pub const OFFLINE_PLACEHOLDER: &str = "not connected";

/// Slice of `text` that fits in `width` columns with the cursor visible.
///
/// `cursor` is a char index. Returns the visible text and the cursor column
/// relative to its start.
pub fn visible_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let w = |c: &char| c.width().unwrap_or(0);

    // Walk back from the cursor until the window is full, keeping one
    // column for the cursor itself.
    let mut start = cursor;
    let mut used = 1;
    while start > 0 && used + w(&chars[start - 1]) <= width.max(1) {
        start -= 1;
        used += w(&chars[start]);
    }

    let cursor_col: usize = chars[start..cursor].iter().map(w).sum();
    let mut end = cursor;
    let mut cols = cursor_col;
    while end < chars.len() && cols + w(&chars[end]) <= width {
        cols += w(&chars[end]);
        end += 1;
    }

    (chars[start..end].iter().collect(), cursor_col)
}

/// Render the input line and place the terminal cursor.
pub fn render_input(frame: &mut Frame, area: Rect, state: &AppState, styles: &ConsoleStyles) {
    let focused = state.focus() == FocusPane::Console;
    let border = if focused && state.input_enabled() {
        styles.focused_border()
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Input ");
    let inner = block.inner(area);

    let prompt_width = INPUT_PROMPT.len() as u16;
    let width = usize::from(inner.width.saturating_sub(prompt_width));

    let line = if state.input_enabled() {
        let input = state.input();
        let (visible, cursor_col) = visible_window(input.text(), input.cursor(), width);
        if focused && inner.height > 0 {
            frame.set_cursor_position(Position::new(
                inner.x + prompt_width + cursor_col as u16,
                inner.y,
            ));
        }
        Line::from(vec![Span::raw(INPUT_PROMPT), Span::raw(visible)])
    } else {
        Line::from(vec![
            Span::styled(INPUT_PROMPT, styles.disabled_input()),
            Span::styled(OFFLINE_PLACEHOLDER, styles.disabled_input()),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
