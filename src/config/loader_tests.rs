//! Tests for configuration file loading.

use super::*;
use crate::classifier::{CHAT_SERVER_PATTERN, PRIVATE_MESSAGE_PATTERN};
use crate::model::Highlight;
use serial_test::serial;
use std::env;
use std::fs;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_ends_with_admin_console_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("admin-console") && path_str.ends_with("config.toml"),
        "Path should contain 'admin-console' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_log_file_name() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("admin-console.log"),
        "got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp(
        "admin_console_test_config.toml",
        r#"
server_url = "ws://mc.example.net:8123/admin"
server_id = "2"
web_base_url = "https://example.net"
max_lines = 500
command_marker = "!"
empty_input = "send"
input_history_size = 20
muted = true
color = false
mention_patterns = ["@console"]
mention_regexes = ['\[[^\]]+ -> me\]']
reconnect_initial_ms = 250
reconnect_max_ms = 5000

[[markup_rules]]
pattern = 'ERROR\]'
groups = [[0, "error"]]
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");
    fs::remove_file(&config_path).ok();

    assert_eq!(
        config.server_url.as_deref(),
        Some("ws://mc.example.net:8123/admin")
    );
    assert_eq!(config.max_lines, Some(500));
    assert_eq!(config.command_marker.as_deref(), Some("!"));
    assert_eq!(config.empty_input, Some(EmptyInputPolicy::SendEmptyMessage));
    assert_eq!(config.muted, Some(true));
    assert_eq!(config.mention_patterns, Some(vec!["@console".to_string()]));
    assert_eq!(
        config.markup_rules,
        Some(vec![MarkupRuleEntry {
            pattern: r"ERROR\]".to_string(),
            groups: vec![(0, "error".to_string())],
        }])
    );
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp("admin_console_test_invalid.toml", "this is not valid TOML ][}{");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => assert_eq!(path, config_path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "Unknown fields must be rejected");
}

#[test]
fn empty_config_file_is_all_none() {
    let config: ConfigFile = toml::from_str("").unwrap();
    assert_eq!(config, ConfigFile::default());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let resolved = merge_config(Some(ConfigFile {
        max_lines: Some(100),
        muted: Some(true),
        mention_regexes: Some(Vec::new()),
        ..ConfigFile::default()
    }));

    assert_eq!(resolved.max_lines, 100);
    assert!(resolved.muted);
    assert!(resolved.mention_regexes.is_empty());
    assert_eq!(resolved.command_marker, "/");
    assert_eq!(resolved.markup_rules, None);
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.max_lines, 4000);
    assert_eq!(config.command_marker, "/");
    assert_eq!(config.empty_input, EmptyInputPolicy::Drop);
    assert!(config.color);
    assert!(!config.muted);
    assert_eq!(
        config.mention_regexes,
        vec![
            CHAT_SERVER_PATTERN.to_string(),
            PRIVATE_MESSAGE_PATTERN.to_string()
        ]
    );
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(admin_console_env)]
fn apply_env_overrides_sets_url_and_server_id() {
    let _url = EnvGuard::new(URL_ENV);
    let _id = EnvGuard::new(SERVER_ID_ENV);
    env::set_var(URL_ENV, "ws://env-host:9000");
    env::set_var(SERVER_ID_ENV, "7");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.server_url.as_deref(), Some("ws://env-host:9000"));
    assert_eq!(result.server_id.as_deref(), Some("7"));
}

#[test]
#[serial(admin_console_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _url = EnvGuard::new(URL_ENV);
    let _id = EnvGuard::new(SERVER_ID_ENV);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(admin_console_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let explicit = write_temp("admin_console_explicit.toml", "max_lines = 11");
    let from_env = write_temp("admin_console_env.toml", "max_lines = 22");
    env::set_var(CONFIG_ENV, &from_env);

    let result = load_config_with_precedence(Some(explicit.clone()));
    fs::remove_file(&explicit).ok();
    fs::remove_file(&from_env).ok();

    assert_eq!(result.unwrap().unwrap().max_lines, Some(11));
}

#[test]
#[serial(admin_console_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let from_env = write_temp("admin_console_env_only.toml", "max_lines = 33");
    env::set_var(CONFIG_ENV, &from_env);

    let result = load_config_with_precedence(None);
    fs::remove_file(&from_env).ok();

    assert_eq!(result.unwrap().unwrap().max_lines, Some(33));
}

#[test]
fn apply_cli_overrides_wins_over_everything() {
    let base = ResolvedConfig {
        server_url: Some("ws://from-file".to_string()),
        ..ResolvedConfig::default()
    };

    let result = apply_cli_overrides(
        base,
        CliOverrides {
            server_url: Some("ws://from-cli".to_string()),
            server_id: Some("3".to_string()),
            max_lines: Some(50),
            muted: true,
            no_color: true,
        },
    );

    assert_eq!(result.server_url.as_deref(), Some("ws://from-cli"));
    assert_eq!(result.server_id.as_deref(), Some("3"));
    assert_eq!(result.max_lines, 50);
    assert!(result.muted);
    assert!(!result.color);
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig {
        muted: true,
        ..ResolvedConfig::default()
    };
    assert_eq!(apply_cli_overrides(base.clone(), CliOverrides::default()), base);
}

#[test]
#[serial(admin_console_env)]
fn precedence_chain_file_then_env_then_cli() {
    let _url = EnvGuard::new(URL_ENV);
    let file = ConfigFile {
        server_url: Some("ws://file".to_string()),
        server_id: Some("file-id".to_string()),
        max_lines: Some(10),
        ..ConfigFile::default()
    };
    env::set_var(URL_ENV, "ws://env");

    let resolved = apply_cli_overrides(
        apply_env_overrides(merge_config(Some(file))),
        CliOverrides {
            max_lines: Some(20),
            ..CliOverrides::default()
        },
    );

    assert_eq!(resolved.server_url.as_deref(), Some("ws://env"));
    assert_eq!(resolved.server_id.as_deref(), Some("file-id"));
    assert_eq!(resolved.max_lines, 20);
}

#[test]
fn console_settings_from_defaults() {
    let settings = ResolvedConfig::default().console_settings().unwrap();
    assert_eq!(settings.max_lines, 4000);
    assert_eq!(settings.command_marker, '/');
    assert_eq!(settings.classifier.markup_rules.len(), 3);
    assert!(settings
        .classifier
        .mentions
        .matches("[Notch -> me] hello"));
}

#[test]
fn console_settings_rejects_zero_max_lines() {
    let config = ResolvedConfig {
        max_lines: 0,
        ..ResolvedConfig::default()
    };
    assert!(matches!(
        config.console_settings(),
        Err(ConfigError::InvalidValue {
            field: "max_lines",
            ..
        })
    ));
}

#[test]
fn console_settings_rejects_bad_marker() {
    for marker in ["", "//", " "] {
        let config = ResolvedConfig {
            command_marker: marker.to_string(),
            ..ResolvedConfig::default()
        };
        assert!(
            matches!(
                config.console_settings(),
                Err(ConfigError::InvalidValue {
                    field: "command_marker",
                    ..
                })
            ),
            "marker {marker:?} should be rejected"
        );
    }
}

#[test]
fn invalid_mention_regex_is_a_config_error() {
    let config = ResolvedConfig {
        mention_regexes: vec!["(".to_string()],
        ..ResolvedConfig::default()
    };
    assert!(matches!(
        config.classifier_config(),
        Err(ConfigError::Pattern(ClassifierError::InvalidRegex { .. }))
    ));
}

#[test]
fn custom_markup_rules_replace_defaults() {
    let config = ResolvedConfig {
        markup_rules: Some(vec![MarkupRuleEntry {
            pattern: r"\[(\w+)\]".to_string(),
            groups: vec![(1, "warn".to_string())],
        }]),
        ..ResolvedConfig::default()
    };

    let classifier = crate::classifier::LineClassifier::new(config.classifier_config().unwrap());
    let line = classifier.classify("[Server] ERROR] stopping");

    assert_eq!(line.highlighted(Highlight::Warn), Some("Server"));
    assert_eq!(line.highlighted(Highlight::Error), None);
}

#[test]
fn unknown_highlight_name_is_a_config_error() {
    let config = ResolvedConfig {
        markup_rules: Some(vec![MarkupRuleEntry {
            pattern: "x".to_string(),
            groups: vec![(0, "blink".to_string())],
        }]),
        ..ResolvedConfig::default()
    };
    assert!(matches!(
        config.classifier_config(),
        Err(ConfigError::Pattern(ClassifierError::UnknownHighlight { .. }))
    ));
}

#[test]
fn reconnect_policy_from_config() {
    let config = ResolvedConfig {
        reconnect_initial_ms: 200,
        reconnect_max_ms: 100,
        ..ResolvedConfig::default()
    };
    let policy = config.reconnect_policy();
    assert_eq!(policy.initial, Duration::from_millis(200));
    assert_eq!(policy.max, Duration::from_millis(200), "cap never below initial");
}

#[test]
fn config_error_messages() {
    let err = ConfigError::InvalidValue {
        field: "max_lines",
        reason: "must be at least 1".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"Invalid value for max_lines: must be at least 1");
}
