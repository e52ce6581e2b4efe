//! Admin Console - Entry Point

use admin_console::config::{self, CliOverrides};
use admin_console::state::AppState;
use admin_console::transport::open_transport;
use admin_console::view::{self, ColorConfig, ViewSettings};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Admin Console - live operator console for a game server
#[derive(Parser, Debug)]
#[command(name = "admin-console")]
#[command(version)]
#[command(about = "Terminal operator console for a game server's admin WebSocket")]
pub struct Args {
    /// Admin socket URL, e.g. ws://mc.example.net:8123/admin
    pub url: Option<String>,

    /// Server id used in player profile links
    #[arg(long)]
    pub server_id: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of console lines to keep (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_lines: Option<u32>,

    /// Start with notification sounds muted
    #[arg(long)]
    pub muted: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Replay recorded frames from a file instead of connecting
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Keep a replay connected after its last frame
    #[arg(long, requires = "replay")]
    pub hold: bool,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            server_url: self.url.clone(),
            server_id: self.server_id.clone(),
            max_lines: self.max_lines.map(|n| n as usize),
            muted: self.muted,
            no_color: self.no_color,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        config::apply_cli_overrides(with_env, args.cli_overrides())
    };

    // Validate before touching the terminal so errors print normally
    let settings = config.console_settings()?;

    admin_console::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let transport = open_transport(
        config.server_url.as_deref(),
        args.replay.clone(),
        args.hold,
        config.reconnect_policy(),
    )?;

    let view_settings = ViewSettings {
        color: ColorConfig::from_env_and_args(!config.color),
        web_base_url: config.web_base_url.clone(),
        server_id: config.server_id.clone(),
    };

    view::run_with_transport(AppState::new(settings), transport, view_settings)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["admin-console", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["admin-console", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["admin-console"]);
        assert_eq!(args.url, None);
        assert_eq!(args.server_id, None);
        assert_eq!(args.config, None);
        assert_eq!(args.max_lines, None);
        assert!(!args.muted);
        assert!(!args.no_color);
        assert_eq!(args.replay, None);
        assert_eq!(args.cli_overrides(), CliOverrides::default());
    }

    #[test]
    fn test_url_is_positional() {
        let args = Args::parse_from(["admin-console", "ws://localhost:8123/admin"]);
        assert_eq!(args.url.as_deref(), Some("ws://localhost:8123/admin"));
    }

    #[test]
    fn test_flags_map_to_overrides() {
        let args = Args::parse_from([
            "admin-console",
            "ws://h",
            "--server-id",
            "2",
            "--max-lines",
            "500",
            "--muted",
            "--no-color",
        ]);
        assert_eq!(
            args.cli_overrides(),
            CliOverrides {
                server_url: Some("ws://h".to_string()),
                server_id: Some("2".to_string()),
                max_lines: Some(500),
                muted: true,
                no_color: true,
            }
        );
    }

    #[test]
    fn test_max_lines_zero_rejected() {
        let result = Args::try_parse_from(["admin-console", "--max-lines", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_hold_requires_replay() {
        assert!(Args::try_parse_from(["admin-console", "--hold"]).is_err());
        let args = Args::parse_from(["admin-console", "--replay", "frames.jsonl", "--hold"]);
        assert_eq!(args.replay, Some(PathBuf::from("frames.jsonl")));
        assert!(args.hold);
    }
}
