//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the input line widget in lines (border + content).
pub const INPUT_HEIGHT: u16 = 3;

/// Width percentage of the roster column.
pub const ROSTER_WIDTH_PERCENT: u16 = 30;

/// Height percentage of the player list within the roster column.
///
/// The user list takes the rest.
pub const PLAYER_LIST_HEIGHT_PERCENT: u16 = 60;

/// Minimum console height kept when the detail panel is open, borders included.
pub const MIN_CONSOLE_HEIGHT: u16 = 5;

/// Rows scrolled per mouse wheel step.
pub const MOUSE_SCROLL_ROWS: isize = 3;

/// Prompt shown before the input text.
pub const INPUT_PROMPT: &str = "> ";
