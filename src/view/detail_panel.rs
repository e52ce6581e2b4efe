//! Player detail panel.
//!
//! Shown below the console while a player is selected.

use crate::model::Player;
use crate::sanitize::styled_runs;
use crate::view::styles::ConsoleStyles;
use crate::view::ViewSettings;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Human readable play time, e.g. `2 hours 5 minutes` or `1 minute`.
pub fn time_spent_string(minutes: u64) -> String {
    fn unit(n: u64, singular: &str, plural: &str) -> String {
        format!("{n} {}", if n == 1 { singular } else { plural })
    }

    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{} {}", unit(hours, "hour", "hours"), unit(rest, "minute", "minutes"))
    } else {
        unit(rest, "minute", "minutes")
    }
}

/// `[world] x, y, z`
pub fn location_string(player: &Player) -> String {
    let p = &player.position;
    format!("[{}] {}, {}, {}", p.world, p.x, p.y, p.z)
}

fn trim_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

/// Link to the player's profile page, when a base URL and server id are configured.
pub fn profile_url(settings: &ViewSettings, username: &str) -> Option<String> {
    let base = settings.web_base_url.as_deref()?;
    let server_id = settings.server_id.as_deref()?;
    Some(format!("{}/{server_id}/player/{username}", trim_base(base)))
}

/// Link to the IP lookup page, when a base URL is configured.
pub fn ip_lookup_url(settings: &ViewSettings, address: &str) -> Option<String> {
    let base = settings.web_base_url.as_deref()?;
    Some(format!("{}/ip/{address}", trim_base(base)))
}

/// Display name spans: the ANSI nickname when present, else the username.
pub fn name_spans(player: &Player, styles: &ConsoleStyles) -> Vec<Span<'static>> {
    let runs = player
        .nickname_ansi
        .as_deref()
        .map(styled_runs)
        .unwrap_or_default();
    if runs.is_empty() {
        return vec![Span::raw(player.display_name().to_string())];
    }
    runs.into_iter()
        .map(|(text, style)| Span::styled(text, styles.external(style)))
        .collect()
}

fn field(label: &'static str, value: String, styles: &ConsoleStyles) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<11}"), styles.label()),
        Span::raw(value),
    ])
}

/// Content lines of the panel.
pub fn detail_lines(
    player: &Player,
    settings: &ViewSettings,
    styles: &ConsoleStyles,
) -> Vec<Line<'static>> {
    // ANSI name only when a nickname is set
    let mut name = if player.has_nickname() {
        let mut spans = name_spans(player, styles);
        spans.push(Span::styled(format!(" ({})", player.username), styles.dim()));
        spans
    } else {
        vec![Span::raw(player.username.clone())]
    };
    if player.donator {
        name.push(Span::styled(" donator", styles.selected()));
    }

    let mut lines = vec![
        Line::from(name),
        field("Rank", player.rank.to_string(), styles),
        field("Time Spent", time_spent_string(player.time_spent_minutes), styles),
        field("IP Address", player.address.clone(), styles),
        field("Health", format!("{:.2}", player.health), styles),
        field("Location", location_string(player), styles),
        field("Titles", player.titles.join(", "), styles),
    ];

    if let Some(url) = profile_url(settings, &player.username) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<11}", "Profile"), styles.label()),
            Span::styled(url, styles.link()),
        ]));
    }
    if let Some(url) = ip_lookup_url(settings, &player.address) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<11}", "IP Lookup"), styles.label()),
            Span::styled(url, styles.link()),
        ]));
    }

    lines
}

/// Panel height including borders.
pub fn panel_height(player: &Player, settings: &ViewSettings) -> u16 {
    let links = usize::from(profile_url(settings, &player.username).is_some())
        + usize::from(ip_lookup_url(settings, &player.address).is_some());
    (7 + links + 2) as u16
}

/// Render the panel into `area`.
pub fn render_detail_panel(
    frame: &mut Frame,
    area: Rect,
    player: &Player,
    settings: &ViewSettings,
    styles: &ConsoleStyles,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Player ")
        .title_bottom(Line::from(" Esc close ").right_aligned());
    let paragraph = Paragraph::new(detail_lines(player, settings, styles)).block(block);
    frame.render_widget(paragraph, area);
}
