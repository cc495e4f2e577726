// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, non-empty paths, and blank secrets.

use crate::diagnostic::ConfigError;
use crate::model::HirewireConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
///
/// An absent webhook secret is valid here: the webhook endpoint reports it
/// per request so the rest of the API can still run.
pub fn validate_config(config: &HirewireConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if !matches!(
        config.server.log_level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level must be one of trace, debug, info, warn, error; got `{}`",
                config.server.log_level
            ),
        });
    }

    if let Some(token) = &config.server.bearer_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "server.bearer_token must not be blank when set".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if let Some(secret) = &config.webhook.secret
        && secret.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "webhook.secret must not be blank when set".to_string(),
        });
    }

    if config.webhook.signature_tolerance_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "webhook.signature_tolerance_secs must be greater than 0".to_string(),
        });
    }

    if config.webhook.max_body_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "webhook.max_body_bytes must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
