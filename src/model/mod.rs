//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod console_input;
pub mod decorated_line;
pub mod error;
pub mod event;
pub mod identifiers;
pub mod key_action;
pub mod roster;

// Re-export for convenience
pub use console_input::ConsoleInput;
pub use decorated_line::{DecoratedLine, Fragment, Highlight, Segment};
pub use error::{AppError, ProtocolError, SnapshotError, TransportError};
pub use event::TransportEvent;
pub use identifiers::{InvalidPlayerId, PlayerId};
pub use key_action::KeyAction;
pub use roster::{Metric, Player, Position, RosterSnapshot, ServerSnapshot, User};
