//! Configuration file loading with precedence handling.

use crate::classifier::{
    default_mention_regexes, default_rules, ClassifierConfig, ClassifierError, MarkupRule,
    MentionMatcher,
};
use crate::state::input_router::{DEFAULT_COMMAND_MARKER, DEFAULT_HISTORY_SIZE};
use crate::state::stream_buffer::DEFAULT_MAX_LINES;
use crate::state::{ConsoleSettings, EmptyInputPolicy};
use crate::transport::ReconnectPolicy;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ADMIN_CONSOLE_CONFIG";
/// Environment variable overriding the server URL.
pub const URL_ENV: &str = "ADMIN_CONSOLE_URL";
/// Environment variable overriding the server id.
pub const SERVER_ID_ENV: &str = "ADMIN_CONSOLE_SERVER_ID";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Config key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A mention or markup pattern does not compile.
    #[error(transparent)]
    Pattern(#[from] ClassifierError),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/admin-console/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// WebSocket URL of the server's admin socket.
    #[serde(default)]
    pub server_url: Option<String>,

    /// Server id used in profile links.
    #[serde(default)]
    pub server_id: Option<String>,

    /// Base URL of the community website, for profile and IP links.
    #[serde(default)]
    pub web_base_url: Option<String>,

    /// Retained console lines.
    #[serde(default)]
    pub max_lines: Option<usize>,

    /// Single character marking a command.
    #[serde(default)]
    pub command_marker: Option<String>,

    /// `"drop"` or `"send"`.
    #[serde(default)]
    pub empty_input: Option<EmptyInputPolicy>,

    /// Input recall history length.
    #[serde(default)]
    pub input_history_size: Option<usize>,

    /// Start muted.
    #[serde(default)]
    pub muted: Option<bool>,

    /// Render with colors.
    #[serde(default)]
    pub color: Option<bool>,

    /// Literal substrings flagging a mention.
    #[serde(default)]
    pub mention_patterns: Option<Vec<String>>,

    /// Regexes flagging a mention. Replaces the built-in private message pattern.
    #[serde(default)]
    pub mention_regexes: Option<Vec<String>>,

    /// Markup rules. Replaces the built-in rules.
    #[serde(default)]
    pub markup_rules: Option<Vec<MarkupRuleEntry>>,

    /// First reconnect delay in milliseconds.
    #[serde(default)]
    pub reconnect_initial_ms: Option<u64>,

    /// Reconnect delay cap in milliseconds.
    #[serde(default)]
    pub reconnect_max_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// One markup rule from TOML.
///
/// ```toml
/// [[markup_rules]]
/// pattern = '(.+: )(.+)( issued server command)'
/// groups = [[2, "actor"], [3, "command"]]
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MarkupRuleEntry {
    /// Regex source.
    pub pattern: String,
    /// Capture group index and highlight class name pairs.
    pub groups: Vec<(usize, String)>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Server URL, if any source provided one.
    pub server_url: Option<String>,
    /// Server id for profile links.
    pub server_id: Option<String>,
    /// Website base URL for profile and IP links.
    pub web_base_url: Option<String>,
    /// Retained console lines.
    pub max_lines: usize,
    /// Command marker as configured; validated by [`ResolvedConfig::console_settings`].
    pub command_marker: String,
    /// Empty input handling.
    pub empty_input: EmptyInputPolicy,
    /// Input recall history length.
    pub input_history_size: usize,
    /// Start muted.
    pub muted: bool,
    /// Render with colors.
    pub color: bool,
    /// Literal mention substrings.
    pub mention_patterns: Vec<String>,
    /// Mention regexes.
    pub mention_regexes: Vec<String>,
    /// Custom markup rules; `None` uses the built-in rules.
    pub markup_rules: Option<Vec<MarkupRuleEntry>>,
    /// First reconnect delay in milliseconds.
    pub reconnect_initial_ms: u64,
    /// Reconnect delay cap in milliseconds.
    pub reconnect_max_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let reconnect = ReconnectPolicy::default();
        Self {
            server_url: None,
            server_id: None,
            web_base_url: None,
            max_lines: DEFAULT_MAX_LINES,
            command_marker: DEFAULT_COMMAND_MARKER.to_string(),
            empty_input: EmptyInputPolicy::default(),
            input_history_size: DEFAULT_HISTORY_SIZE,
            muted: false,
            color: true,
            mention_patterns: Vec::new(),
            mention_regexes: default_mention_regexes(),
            markup_rules: None,
            reconnect_initial_ms: reconnect.initial.as_millis() as u64,
            reconnect_max_ms: reconnect.max.as_millis() as u64,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Compile mention patterns and markup rules.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Pattern` for a regex that does not compile, an
    /// unknown highlight name or a capture group the pattern lacks.
    pub fn classifier_config(&self) -> Result<ClassifierConfig, ConfigError> {
        let mentions =
            MentionMatcher::compile(self.mention_patterns.clone(), &self.mention_regexes)?;
        let markup_rules = match &self.markup_rules {
            None => default_rules(),
            Some(entries) => entries
                .iter()
                .map(|e| MarkupRule::from_names(&e.pattern, &e.groups))
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(ClassifierConfig {
            mentions,
            markup_rules,
        })
    }

    /// Validate and build the console core settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero `max_lines` or a command
    /// marker that is not exactly one non-whitespace character, and
    /// `ConfigError::Pattern` for pattern errors.
    pub fn console_settings(&self) -> Result<ConsoleSettings, ConfigError> {
        if self.max_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_lines",
                reason: "must be at least 1".to_string(),
            });
        }

        let mut chars = self.command_marker.chars();
        let command_marker = match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => c,
            _ => {
                return Err(ConfigError::InvalidValue {
                    field: "command_marker",
                    reason: format!(
                        "expected one non-whitespace character, got {:?}",
                        self.command_marker
                    ),
                })
            }
        };

        Ok(ConsoleSettings {
            max_lines: self.max_lines,
            classifier: self.classifier_config()?,
            command_marker,
            empty_input: self.empty_input,
            history_size: self.input_history_size,
            muted: self.muted,
        })
    }

    /// Reconnect backoff derived from the configured delays.
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        let initial = Duration::from_millis(self.reconnect_initial_ms.max(1));
        ReconnectPolicy {
            initial,
            max: Duration::from_millis(self.reconnect_max_ms).max(initial),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/admin-console/admin-console.log` on Linux, or the
/// platform state directory elsewhere. Falls back to the current directory
/// when no state directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("admin-console").join("admin-console.log")
    } else {
        PathBuf::from("admin-console.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/admin-console/config.toml` on Linux, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("admin-console").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ADMIN_CONSOLE_CONFIG` environment variable
/// 3. Default path `~/.config/admin-console/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        server_url: config.server_url.or(defaults.server_url),
        server_id: config.server_id.or(defaults.server_id),
        web_base_url: config.web_base_url.or(defaults.web_base_url),
        max_lines: config.max_lines.unwrap_or(defaults.max_lines),
        command_marker: config.command_marker.unwrap_or(defaults.command_marker),
        empty_input: config.empty_input.unwrap_or(defaults.empty_input),
        input_history_size: config
            .input_history_size
            .unwrap_or(defaults.input_history_size),
        muted: config.muted.unwrap_or(defaults.muted),
        color: config.color.unwrap_or(defaults.color),
        mention_patterns: config.mention_patterns.unwrap_or(defaults.mention_patterns),
        mention_regexes: config.mention_regexes.unwrap_or(defaults.mention_regexes),
        markup_rules: config.markup_rules.or(defaults.markup_rules),
        reconnect_initial_ms: config
            .reconnect_initial_ms
            .unwrap_or(defaults.reconnect_initial_ms),
        reconnect_max_ms: config.reconnect_max_ms.unwrap_or(defaults.reconnect_max_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `ADMIN_CONSOLE_URL`: server URL
/// - `ADMIN_CONSOLE_SERVER_ID`: server id
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var(URL_ENV) {
        config.server_url = Some(url);
    }

    if let Ok(server_id) = std::env::var(SERVER_ID_ENV) {
        config.server_id = Some(server_id);
    }

    config
}

/// Overrides taken from command-line flags.
///
/// `None` (or `false` for switches) leaves the lower-precedence value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Positional server URL.
    pub server_url: Option<String>,
    /// `--server-id`.
    pub server_id: Option<String>,
    /// `--max-lines`.
    pub max_lines: Option<usize>,
    /// `--muted`.
    pub muted: bool,
    /// `--no-color`.
    pub no_color: bool,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(url) = cli.server_url {
        config.server_url = Some(url);
    }

    if let Some(server_id) = cli.server_id {
        config.server_id = Some(server_id);
    }

    if let Some(max_lines) = cli.max_lines {
        config.max_lines = max_lines;
    }

    if cli.muted {
        config.muted = true;
    }

    if cli.no_color {
        config.color = false;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
