//! Roster column: connected players above registered users.

use crate::model::{Player, PlayerId, User};
use crate::state::{AppState, FocusPane};
use crate::view::detail_panel::name_spans;
use crate::view::styles::ConsoleStyles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// First visible row of a list so that `cursor` stays in view.
pub fn list_offset(cursor: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    cursor.min(len - 1).saturating_sub(height - 1)
}

fn inner_height(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(2))
}

/// Player under a mouse position in the player list, if any.
pub fn player_at(area: Rect, column: u16, row: u16, state: &AppState) -> Option<PlayerId> {
    let inside = column > area.x
        && column < area.x + area.width.saturating_sub(1)
        && row > area.y
        && row < area.y + area.height.saturating_sub(1);
    if !inside {
        return None;
    }
    let players = state.players();
    let offset = list_offset(state.roster_cursor(), players.len(), inner_height(area));
    let index = offset + usize::from(row - area.y - 1);
    players.get(index).map(|p| p.id.clone())
}

fn player_line(
    player: &Player,
    selected: bool,
    under_cursor: bool,
    styles: &ConsoleStyles,
) -> Line<'static> {
    let mut spans = Vec::new();
    spans.push(if selected {
        Span::styled("* ", styles.selected())
    } else {
        Span::raw("  ")
    });
    spans.extend(name_spans(player, styles));
    spans.push(Span::styled(format!(" #{}", player.rank), styles.dim()));

    let line = Line::from(spans);
    if under_cursor {
        line.style(styles.cursor())
    } else {
        line
    }
}

fn user_line(user: &User, styles: &ConsoleStyles) -> Line<'static> {
    let name_style = match user.active {
        Some(true) => styles.active_user(),
        Some(false) => styles.inactive_user(),
        None => ratatui::style::Style::default(),
    };
    let mut spans = vec![Span::styled(user.display_name().to_string(), name_style)];
    if let Some(address) = &user.address {
        spans.push(Span::styled(format!("  {address}"), styles.dim()));
    }
    Line::from(spans)
}

fn border_style(focused: bool, styles: &ConsoleStyles) -> ratatui::style::Style {
    if focused {
        styles.focused_border()
    } else {
        ratatui::style::Style::default()
    }
}

/// Render the player list.
pub fn render_players(frame: &mut Frame, area: Rect, state: &AppState, styles: &ConsoleStyles) {
    let focused = state.focus() == FocusPane::Roster;
    let selected = state.selected_player().map(|p| p.id.clone());
    let players = state.players();
    let cursor = state.roster_cursor();
    let offset = list_offset(cursor, players.len(), inner_height(area));

    let lines: Vec<Line> = players
        .iter()
        .enumerate()
        .skip(offset)
        .take(inner_height(area))
        .map(|(i, p)| {
            player_line(
                p,
                selected.as_ref() == Some(&p.id),
                focused && i == cursor,
                styles,
            )
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused, styles))
        .title(format!(" Players ({}) ", players.len()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Rows of the user list for `height` visible rows.
///
/// When the users do not fit, the last row becomes a `+N more` marker.
pub fn user_lines(users: &[User], height: usize, styles: &ConsoleStyles) -> Vec<Line<'static>> {
    if users.len() <= height {
        return users.iter().map(|u| user_line(u, styles)).collect();
    }
    let shown = height.saturating_sub(1);
    let mut lines: Vec<Line> = users[..shown].iter().map(|u| user_line(u, styles)).collect();
    if height > 0 {
        lines.push(Line::from(Span::styled(
            format!("+{} more", users.len() - shown),
            styles.dim(),
        )));
    }
    lines
}

/// Render the user list.
pub fn render_users(frame: &mut Frame, area: Rect, state: &AppState, styles: &ConsoleStyles) {
    let users = state.users();
    let lines = user_lines(users, inner_height(area), styles);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Users ({}) ", users.len()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
