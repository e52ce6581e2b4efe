//! Roster and server status domain types.
//!
//! These are the validated forms of the `server-status` payload. A
//! [`RosterSnapshot`] is always complete: the transport layer rejects
//! payloads that cannot be turned into one, so the store never holds a
//! partially applied update.

use crate::model::PlayerId;
use chrono::{DateTime, Utc};
use std::fmt;

/// A server metric as the server reports it: a number or preformatted text.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    /// Numeric value.
    Number(f64),
    /// Text value, displayed verbatim.
    Text(String),
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Metric::Number(n) => write!(f, "{:.2}", n),
            Metric::Text(s) => f.write_str(s),
        }
    }
}

/// Population and performance figures of the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSnapshot {
    /// Players currently online.
    pub num_players: Metric,
    /// Player capacity.
    pub max_players: Metric,
    /// Server ticks per second.
    pub tps: Metric,
    /// Host load figure.
    pub load: Metric,
    /// When the snapshot was received.
    pub received_at: DateTime<Utc>,
}

/// World coordinates of a player.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// World (dimension) name.
    pub world: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

/// A player currently connected to the game server.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Stable identifier (uuid).
    pub id: PlayerId,
    /// Account name.
    pub username: String,
    /// Optional plain nickname.
    pub nickname: Option<String>,
    /// Optional nickname with ANSI color sequences.
    pub nickname_ansi: Option<String>,
    /// Leaderboard rank.
    pub rank: u32,
    /// Current location.
    pub position: Position,
    /// Health points.
    pub health: f64,
    /// Total time played, in minutes.
    pub time_spent_minutes: u64,
    /// Network address the player is connected from.
    pub address: String,
    /// Earned title names.
    pub titles: Vec<String>,
    /// Whether the player holds donator status.
    pub donator: bool,
}

impl Player {
    /// Name to show for the player: nickname if set, else the username.
    pub fn display_name(&self) -> &str {
        match &self.nickname {
            Some(nick) if !nick.is_empty() => nick,
            _ => &self.username,
        }
    }

    /// Whether the player has a nickname distinct from the username.
    pub fn has_nickname(&self) -> bool {
        self.nickname.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// A registered user account (website roster).
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Stable identifier (uuid).
    pub id: PlayerId,
    /// Account name.
    pub username: String,
    /// Optional nickname.
    pub nickname: Option<String>,
    /// Last known address.
    pub address: Option<String>,
    /// Activity flag; `None` when the server does not report it.
    pub active: Option<bool>,
}

impl User {
    /// Name to show for the user: nickname if set, else the username.
    pub fn display_name(&self) -> &str {
        match &self.nickname {
            Some(nick) if !nick.is_empty() => nick,
            _ => &self.username,
        }
    }
}

/// One complete `server-status` push: status figures plus both roster lists.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSnapshot {
    /// Server population and performance.
    pub status: ServerSnapshot,
    /// Connected players, in server order.
    pub players: Vec<Player>,
    /// Registered users, in server order.
    pub users: Vec<User>,
}

impl RosterSnapshot {
    /// Find a player by id.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_metric_prints_without_decimals() {
        assert_eq!(Metric::Number(12.0).to_string(), "12");
    }

    #[test]
    fn fractional_metric_prints_two_decimals() {
        assert_eq!(Metric::Number(19.987).to_string(), "19.99");
    }

    #[test]
    fn text_metric_prints_verbatim() {
        assert_eq!(Metric::Text("n/a".to_string()).to_string(), "n/a");
    }

    fn user(nickname: Option<&str>) -> User {
        User {
            id: PlayerId::new("u1").unwrap(),
            username: "steve".to_string(),
            nickname: nickname.map(str::to_string),
            address: None,
            active: None,
        }
    }

    #[test]
    fn user_display_name_prefers_nickname() {
        assert_eq!(user(Some("Stevie")).display_name(), "Stevie");
        assert_eq!(user(None).display_name(), "steve");
        assert_eq!(user(Some("")).display_name(), "steve");
    }
}
