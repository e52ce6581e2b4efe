//! Wire protocol: JSON frames of the form `{"event": ..., "data": ...}`.
//!
//! Decoding is the trust boundary. Every string that will reach the terminal
//! is sanitized here, and `server-status` payloads are validated into a
//! complete [`RosterSnapshot`] or rejected as a whole.

use crate::model::{
    ConsoleInput, Metric, Player, PlayerId, Position, ProtocolError, RosterSnapshot,
    ServerSnapshot, SnapshotError, TransportEvent, User,
};
use crate::sanitize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Inbound console output event.
pub const CONSOLE_EVENT: &str = "console";
/// Inbound roster/status event.
pub const SERVER_STATUS_EVENT: &str = "server-status";
/// Outbound operator input event.
pub const CONSOLE_INPUT_EVENT: &str = "console-input";

#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConsolePayload {
    Line { line: String },
    Batch { batch: Vec<String> },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetricWire {
    Number(f64),
    Text(String),
}

impl From<MetricWire> for Metric {
    fn from(wire: MetricWire) -> Self {
        match wire {
            MetricWire::Number(n) => Metric::Number(n),
            MetricWire::Text(s) => Metric::Text(sanitize::console_text(&s)),
        }
    }
}

/// The `server-status` payload as sent by the server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatusPayload {
    num_players: MetricWire,
    max_players: MetricWire,
    tps: MetricWire,
    load: MetricWire,
    players: Vec<PlayerPayload>,
    users: Vec<UserPayload>,
}

#[derive(Debug, Deserialize)]
struct PlayerPayload {
    uuid: String,
    username: String,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default, rename = "nicknameAnsi")]
    nickname_ansi: Option<String>,
    rank: u32,
    world: String,
    x: f64,
    y: f64,
    z: f64,
    health: f64,
    time_spent: u64,
    address: String,
    #[serde(default)]
    titles: Vec<TitlePayload>,
    #[serde(default)]
    donator: bool,
}

#[derive(Debug, Deserialize)]
struct TitlePayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    uuid: String,
    username: String,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    active: Option<bool>,
}

impl ServerStatusPayload {
    /// Validate into a snapshot.
    ///
    /// Ids must be non-empty and unique within each list. Text fields are
    /// sanitized; the ANSI nickname is kept raw for styled rendering.
    pub fn into_snapshot(self, received_at: DateTime<Utc>) -> Result<RosterSnapshot, SnapshotError> {
        let player_ids = validate_ids("players", self.players.iter().map(|p| p.uuid.as_str()))?;
        let user_ids = validate_ids("users", self.users.iter().map(|u| u.uuid.as_str()))?;

        let players = self
            .players
            .into_iter()
            .zip(player_ids)
            .map(|(p, id)| Player {
                id,
                username: sanitize::console_text(&p.username),
                nickname: p.nickname.map(|n| sanitize::console_text(&n)),
                nickname_ansi: p.nickname_ansi,
                rank: p.rank,
                position: Position {
                    world: sanitize::console_text(&p.world),
                    x: p.x,
                    y: p.y,
                    z: p.z,
                },
                health: p.health,
                time_spent_minutes: p.time_spent,
                address: sanitize::console_text(&p.address),
                titles: p
                    .titles
                    .into_iter()
                    .map(|t| sanitize::console_text(&t.name))
                    .collect(),
                donator: p.donator,
            })
            .collect();

        let users = self
            .users
            .into_iter()
            .zip(user_ids)
            .map(|(u, id)| User {
                id,
                username: sanitize::console_text(&u.username),
                nickname: u.nickname.map(|n| sanitize::console_text(&n)),
                address: u.address.map(|a| sanitize::console_text(&a)),
                active: u.active,
            })
            .collect();

        Ok(RosterSnapshot {
            status: ServerSnapshot {
                num_players: self.num_players.into(),
                max_players: self.max_players.into(),
                tps: self.tps.into(),
                load: self.load.into(),
                received_at,
            },
            players,
            users,
        })
    }
}

fn validate_ids<'a>(
    list: &'static str,
    raw: impl Iterator<Item = &'a str>,
) -> Result<Vec<PlayerId>, SnapshotError> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for (index, uuid) in raw.enumerate() {
        let id = PlayerId::new(uuid).map_err(|_| SnapshotError::EmptyId { list, index })?;
        if !seen.insert(id.clone()) {
            return Err(SnapshotError::DuplicateId {
                list,
                id: id.as_str().to_string(),
            });
        }
        ids.push(id);
    }
    Ok(ids)
}

/// Decode one text frame.
///
/// Returns `Ok(None)` for events this console does not handle.
pub fn decode_frame(text: &str) -> Result<Option<TransportEvent>, ProtocolError> {
    let envelope: Envelope =
        serde_json::from_str(text).map_err(|e| ProtocolError::InvalidFrame {
            message: e.to_string(),
        })?;

    match envelope.event.as_str() {
        CONSOLE_EVENT => {
            let payload: ConsolePayload = serde_json::from_value(envelope.data).map_err(|e| {
                ProtocolError::MalformedConsole {
                    message: e.to_string(),
                }
            })?;
            let raw = match payload {
                ConsolePayload::Line { line } => vec![line],
                ConsolePayload::Batch { batch } => batch,
            };
            Ok(Some(TransportEvent::ConsoleLines(split_lines(&raw))))
        }
        SERVER_STATUS_EVENT => {
            let payload: ServerStatusPayload =
                serde_json::from_value(envelope.data).map_err(|e| {
                    ProtocolError::MalformedSnapshot {
                        message: e.to_string(),
                    }
                })?;
            let snapshot = payload.into_snapshot(Utc::now())?;
            Ok(Some(TransportEvent::ServerStatus(snapshot)))
        }
        other => {
            tracing::debug!(event = other, "Ignoring unhandled event");
            Ok(None)
        }
    }
}

/// Split payload strings on embedded newlines and sanitize each row.
fn split_lines(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|chunk| chunk.split('\n'))
        .map(|row| sanitize::console_text(row.strip_suffix('\r').unwrap_or(row)))
        .collect()
}

#[derive(Serialize)]
struct OutboundFrame<'a> {
    event: &'static str,
    data: &'a ConsoleInput,
}

/// Encode operator input as a `console-input` frame.
pub fn encode_input(input: &ConsoleInput) -> serde_json::Result<String> {
    serde_json::to_string(&OutboundFrame {
        event: CONSOLE_INPUT_EVENT,
        data: input,
    })
}
