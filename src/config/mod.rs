//! Configuration module.
//!
//! Settings resolve in layers: built-in defaults, then the TOML config file,
//! then environment variables, then command-line flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, MarkupRuleEntry, ResolvedConfig,
};
