//! Admin Console
//!
//! Terminal operator console for a remote game server: live log stream,
//! player roster with detail panel, and command/chat input over the
//! server's admin WebSocket.
//!
//! Pure core (`classifier`, `model`, `state`) with an impure shell
//! (`transport`, `view`, `logging`).

pub mod classifier;
pub mod config;
pub mod logging;
pub mod model;
pub mod notifier;
pub mod sanitize;
pub mod state;
pub mod transport;
pub mod view;

#[cfg(test)]
mod test_harness;
