//! Console state (pure).
//!
//! All state transitions are plain functions on owned data, testable
//! without a terminal or a socket.

pub mod app_state;
pub mod connection;
pub mod input_line;
pub mod input_router;
pub mod roster_store;
pub mod selection;
pub mod stream_buffer;
pub mod viewport;

// Re-export for convenience
pub use app_state::{AppState, ConsoleSettings, FocusPane};
pub use connection::{ConnectionState, IllegalTransition};
pub use input_line::InputLine;
pub use input_router::{EmptyInputPolicy, InputHistory, InputRouter, OutboundSink};
pub use roster_store::RosterStore;
pub use selection::SelectionController;
pub use stream_buffer::{AppendOutcome, StreamBuffer, ViewportMetrics, ViewportProbe};
pub use viewport::ConsoleViewport;
