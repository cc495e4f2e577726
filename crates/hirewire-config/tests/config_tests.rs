// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Hirewire configuration system.

use std::path::Path;

use hirewire_config::diagnostic::{ConfigError, closest_key};
use hirewire_config::model::HirewireConfig;
use hirewire_config::{load_and_validate_str, load_config_from_path, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_hirewire_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
bearer_token = "hr-token"
log_level = "debug"

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[webhook]
secret = "wsec_abc"
signature_tolerance_secs = 60
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.bearer_token.as_deref(), Some("hr-token"));
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.webhook.secret.as_deref(), Some("wsec_abc"));
    assert_eq!(config.webhook.signature_tolerance_secs, 60);
}

/// Unknown field in [webhook] section produces an error naming the key.
#[test]
fn unknown_field_in_webhook_produces_error() {
    let toml = r#"
[webhook]
scret = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("scret"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telegram]
bot_token = "abc"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Missing optional sections fall back to defaults.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert!(config.server.bearer_token.is_none());
    assert!(config.webhook.secret.is_none());
    assert_eq!(config.webhook.signature_tolerance_secs, 1800);
    assert!(config.storage.wal_mode);
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_file_silently_skipped() {
    figment::Jail::expect_with(|_jail| {
        let config = load_config_from_path(Path::new("/nonexistent/path/hirewire.toml"))?;
        assert_eq!(config.server.port, 8080);
        Ok(())
    });
}

/// HIREWIRE_WEBHOOK_SECRET maps to webhook.secret, and multi-underscore keys
/// keep their underscores.
#[test]
fn env_vars_override_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "hirewire.toml",
            r#"
[webhook]
secret = "from-file"

[server]
port = 7000
"#,
        )?;
        jail.set_env("HIREWIRE_WEBHOOK_SECRET", "from-env");
        jail.set_env("HIREWIRE_WEBHOOK_SIGNATURE_TOLERANCE_SECS", "120");
        jail.set_env("HIREWIRE_STORAGE_DATABASE_PATH", "/var/lib/hirewire/db.sqlite");

        let config = load_config_from_path(Path::new("hirewire.toml"))?;
        assert_eq!(config.webhook.secret.as_deref(), Some("from-env"));
        assert_eq!(config.webhook.signature_tolerance_secs, 120);
        assert_eq!(config.storage.database_path, "/var/lib/hirewire/db.sqlite");
        assert_eq!(config.server.port, 7000);
        Ok(())
    });
}

/// Secrets never appear in Debug output.
#[test]
fn debug_output_redacts_secrets() {
    let mut config = HirewireConfig::default();
    config.webhook.secret = Some("wsec_super_secret".to_string());
    config.server.bearer_token = Some("bearer_super_secret".to_string());

    let debug = format!("{config:?}");
    assert!(!debug.contains("wsec_super_secret"));
    assert!(!debug.contains("bearer_super_secret"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn diagnostic_scret_suggests_secret() {
    let valid = &["secret", "signature_tolerance_secs", "max_body_bytes"];
    assert_eq!(closest_key("scret", valid), Some("secret".to_string()));
}

/// Unknown key diagnostics list the valid keys of the section.
#[test]
fn diagnostic_error_includes_valid_keys() {
    let toml = r#"
[webhook]
scret = "abc"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown key should fail");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                section,
                key,
                suggestion,
                valid_keys,
                ..
            } => Some((
                section.clone(),
                key.clone(),
                suggestion.clone(),
                valid_keys.clone(),
            )),
            _ => None,
        })
        .expect("should produce an UnknownKey error");

    assert_eq!(unknown.0, "webhook");
    assert_eq!(unknown.1, "scret");
    assert_eq!(unknown.2.as_deref(), Some("secret"));
    assert!(unknown.3.contains("max_body_bytes"));
}

/// Wrong value types produce an InvalidType diagnostic.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[server]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("string port should fail");
    let err_str = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(
        err_str.contains("server.port"),
        "error should name the dotted key, got: {err_str}"
    );
}

/// Type errors in a string config carry a span pointing at the key.
#[test]
fn invalid_type_diagnostic_has_source_span() {
    let toml = "[server]\nhost = \"0.0.0.0\"\nport = \"eighty\"\n";

    let errors = load_and_validate_str(toml).expect_err("string port should fail");
    let span = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::InvalidType { span, .. } => *span,
            _ => None,
        })
        .expect("InvalidType should carry a span");
    assert_eq!(&toml[span.offset()..span.offset() + span.len()], "port");
}

/// A misspelled section header is its own diagnostic, not an unknown key.
#[test]
fn unknown_section_suggests_closest_section() {
    let errors = load_and_validate_str("[serve]\nport = 1\n").expect_err("should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownSection { section, suggestion, .. }
            if section == "serve" && suggestion.as_deref() == Some("server")
    )));
}

/// The webhook body limit is configurable from file and environment.
#[test]
fn max_body_bytes_loads_from_file_and_env() {
    let config = load_config_from_str("[webhook]\nmax_body_bytes = 1048576\n").unwrap();
    assert_eq!(config.webhook.max_body_bytes, 1_048_576);

    figment::Jail::expect_with(|jail| {
        jail.create_file("hirewire.toml", "")?;
        jail.set_env("HIREWIRE_WEBHOOK_MAX_BODY_BYTES", "4096");
        let config = load_config_from_path(Path::new("hirewire.toml"))?;
        assert_eq!(config.webhook.max_body_bytes, 4096);
        Ok(())
    });
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::UnknownKey {
        section: "webhook".to_string(),
        key: "scret".to_string(),
        suggestion: Some("secret".to_string()),
        valid_keys: "secret, signature_tolerance_secs, max_body_bytes".to_string(),
        span: None,
        src: None,
    };

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("scret"), "rendered report should mention the key");
    assert!(buf.contains("did you mean"));
}

#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[webhook]
secret = "wsec_abc"
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.webhook.secret.as_deref(), Some("wsec_abc"));
}

/// Validation runs after a successful load.
#[test]
fn validation_catches_zero_tolerance() {
    let toml = r#"
[webhook]
signature_tolerance_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero tolerance should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("signature_tolerance_secs"))
    }));
}
