//! WebSocket transport with automatic reconnection.
//!
//! The socket lives on a dedicated thread running a current-thread tokio
//! runtime. Decoded events flow to the UI loop through a std channel in
//! arrival order; operator input flows back through an unbounded tokio
//! channel. Dropping the transport closes both channels, which stops the
//! worker at its next await point.

use super::protocol::{decode_frame, encode_input};
use crate::model::{ConsoleInput, TransportError, TransportEvent};
use crate::state::OutboundSink;
use futures_util::{SinkExt, StreamExt};
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Exponential backoff between connection attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Delay after the first failure.
    pub initial: Duration,
    /// Upper bound on the delay.
    pub max: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(500),
            max: Duration::from_secs(30),
        }
    }
}

impl ReconnectPolicy {
    /// Delay before retry number `attempt` (0-based): `initial * 2^attempt`,
    /// capped at `max`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.min(31)).unwrap_or(u32::MAX);
        self.initial.saturating_mul(factor).min(self.max)
    }
}

/// Live connection to the game server's admin socket.
#[derive(Debug)]
pub struct WebSocketTransport {
    events: std_mpsc::Receiver<TransportEvent>,
    outbound: mpsc::UnboundedSender<ConsoleInput>,
}

impl WebSocketTransport {
    /// Start connecting to `url` in the background.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidUrl` unless the URL is `ws://`, and
    /// `TransportError::Io` if the worker thread cannot start.
    pub fn spawn(url: &str, policy: ReconnectPolicy) -> Result<Self, TransportError> {
        if !url.starts_with("ws://") || url.len() == "ws://".len() {
            return Err(TransportError::InvalidUrl {
                url: url.to_string(),
            });
        }

        let (events_tx, events_rx) = std_mpsc::channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let url = url.to_string();

        std::thread::Builder::new()
            .name("admin-console-ws".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        warn!(error = %e, "Failed to start transport runtime");
                        return;
                    }
                };
                runtime.block_on(run(url, policy, events_tx, outbound_rx));
            })?;

        Ok(Self {
            events: events_rx,
            outbound: outbound_tx,
        })
    }

    /// Drain all events received so far without blocking.
    pub fn poll(&self) -> Vec<TransportEvent> {
        self.events.try_iter().collect()
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<TransportEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}

impl OutboundSink for WebSocketTransport {
    fn send(&mut self, input: ConsoleInput) {
        if self.outbound.send(input).is_err() {
            warn!("Transport worker stopped; input not sent");
        }
    }
}

enum SessionEnd {
    /// The UI side went away.
    Shutdown,
    /// The connection dropped.
    Lost(String),
}

async fn run(
    url: String,
    policy: ReconnectPolicy,
    events: std_mpsc::Sender<TransportEvent>,
    mut outbound: mpsc::UnboundedReceiver<ConsoleInput>,
) {
    let mut attempt: u32 = 0;
    loop {
        if events.send(TransportEvent::Connecting).is_err() {
            return;
        }

        match connect_async(url.as_str()).await {
            Ok((socket, _response)) => {
                info!(url = %url, "Connected");
                attempt = 0;
                if events.send(TransportEvent::Connected).is_err() {
                    return;
                }
                match session(socket, &events, &mut outbound).await {
                    SessionEnd::Shutdown => return,
                    SessionEnd::Lost(reason) => {
                        if events.send(TransportEvent::Disconnected { reason }).is_err() {
                            return;
                        }
                    }
                }
            }
            Err(e) => warn!(url = %url, attempt, error = %e, "Connection attempt failed"),
        }

        let delay = policy.delay(attempt);
        attempt = attempt.saturating_add(1);
        debug!(delay_ms = delay.as_millis() as u64, "Waiting before reconnect");
        if !backoff(delay, &mut outbound).await {
            return;
        }
    }
}

/// Sleep for `delay`, discarding input sent meanwhile. Returns `false` if the
/// outbound channel closed.
async fn backoff(delay: Duration, outbound: &mut mpsc::UnboundedReceiver<ConsoleInput>) -> bool {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);
    loop {
        tokio::select! {
            () = &mut sleep => return true,
            input = outbound.recv() => match input {
                None => return false,
                Some(input) => warn!(text = input.text(), "Not connected; input dropped"),
            },
        }
    }
}

async fn session(
    socket: Socket,
    events: &std_mpsc::Sender<TransportEvent>,
    outbound: &mut mpsc::UnboundedReceiver<ConsoleInput>,
) -> SessionEnd {
    let (mut sink, mut stream) = socket.split();
    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => match decode_frame(&text) {
                    Ok(Some(event)) => {
                        if events.send(event).is_err() {
                            return SessionEnd::Shutdown;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "Dropping inbound frame"),
                },
                Some(Ok(Message::Close(frame))) => {
                    let reason = frame
                        .map(|f| f.reason.to_string())
                        .filter(|r| !r.is_empty())
                        .unwrap_or_else(|| "closed by server".to_string());
                    return SessionEnd::Lost(reason);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return SessionEnd::Lost(e.to_string()),
                None => return SessionEnd::Lost("stream ended".to_string()),
            },
            input = outbound.recv() => match input {
                None => {
                    let _ = sink.close().await;
                    return SessionEnd::Shutdown;
                }
                Some(input) => match encode_input(&input) {
                    Ok(text) => {
                        if let Err(e) = sink.send(Message::Text(text)).await {
                            return SessionEnd::Lost(e.to_string());
                        }
                    }
                    Err(e) => warn!(error = %e, "Failed to encode input"),
                },
            },
        }
    }
}
