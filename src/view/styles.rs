//! Console styling configuration.
//!
//! Maps highlight classes, connection states and roster markers to styles.
//! With colors disabled every style falls back to modifiers only, so the
//! selection and cursor stay visible on monochrome terminals.

use crate::model::Highlight;
use crate::state::ConnectionState;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag or `color = false` in the config file
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `no_color_flag` (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Explicit setting, ignoring the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

// ===== ConsoleStyles =====

/// Background of a console line that mentions the operator.
pub const MENTION_BACKGROUND: Color = Color::Rgb(0xAA, 0x00, 0xAA);

/// Styles used across the console panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleStyles {
    colors: bool,
}

impl ConsoleStyles {
    /// Create styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        Self {
            colors: config.colors_enabled(),
        }
    }

    /// Whether colored output is enabled.
    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    fn color(&self, style: Style) -> Style {
        if self.colors {
            style
        } else {
            Style::default().add_modifier(style.add_modifier)
        }
    }

    /// Style of a highlighted console segment.
    pub fn highlight(&self, highlight: Highlight) -> Style {
        self.color(match highlight {
            Highlight::Actor => Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
            Highlight::Command => Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            Highlight::Warn => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Highlight::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        })
    }

    /// Line style of a mention.
    pub fn mention(&self) -> Style {
        if self.colors {
            Style::default().bg(MENTION_BACKGROUND).fg(Color::White)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }

    /// Style of the connection indicator for a state.
    pub fn connection(&self, state: ConnectionState) -> Style {
        self.color(match state {
            ConnectionState::Connected => Style::default().fg(Color::Green),
            ConnectionState::Connecting => Style::default().fg(Color::Yellow),
            ConnectionState::Disconnected => {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            }
        })
    }

    /// Secondary text such as ranks and addresses.
    pub fn dim(&self) -> Style {
        self.color(Style::default().fg(Color::DarkGray))
    }

    /// Border of the pane that has focus.
    pub fn focused_border(&self) -> Style {
        self.color(Style::default().fg(Color::Cyan))
    }

    /// Roster row under the cursor.
    pub fn cursor(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    /// Marker of the selected player.
    pub fn selected(&self) -> Style {
        self.color(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
    }

    /// User whose `active` flag is set.
    pub fn active_user(&self) -> Style {
        self.color(Style::default().fg(Color::Green))
    }

    /// User whose `active` flag is cleared.
    pub fn inactive_user(&self) -> Style {
        self.color(Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT))
    }

    /// The input line while input is refused.
    pub fn disabled_input(&self) -> Style {
        self.color(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
    }

    /// Field labels in the detail panel.
    pub fn label(&self) -> Style {
        self.color(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    }

    /// Links in the detail panel.
    pub fn link(&self) -> Style {
        self.color(Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED))
    }

    /// Strip colors from an externally styled run when colors are disabled.
    pub fn external(&self, style: Style) -> Style {
        self.color(style)
    }
}

impl Default for ConsoleStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::default())
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR with any value should disable colors"
        );
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    #[test]
    fn mention_uses_magenta_background() {
        let styles = ConsoleStyles::default();
        assert_eq!(styles.mention().bg, Some(MENTION_BACKGROUND));
    }

    #[test]
    fn highlights_are_distinct() {
        let styles = ConsoleStyles::default();
        assert_ne!(
            styles.highlight(Highlight::Warn),
            styles.highlight(Highlight::Error)
        );
        assert_ne!(
            styles.highlight(Highlight::Actor),
            styles.highlight(Highlight::Command)
        );
    }

    #[test]
    fn no_color_keeps_modifiers_only() {
        let styles = ConsoleStyles::with_color_config(ColorConfig::new(false));

        let error = styles.highlight(Highlight::Error);
        assert_eq!(error.fg, None);
        assert!(error.add_modifier.contains(Modifier::BOLD));

        let mention = styles.mention();
        assert_eq!(mention.bg, None);
        assert!(mention.add_modifier.contains(Modifier::REVERSED));

        let nick = styles.external(Style::default().fg(Color::Red));
        assert_eq!(nick, Style::default());
    }
}
