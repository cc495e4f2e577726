// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hirewire.toml` > `~/.config/hirewire/hirewire.toml` > `/etc/hirewire/hirewire.toml`
//! with environment variable overrides via `HIREWIRE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HirewireConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hirewire/hirewire.toml` (system-wide)
/// 3. `~/.config/hirewire/hirewire.toml` (user XDG config)
/// 4. `./hirewire.toml` (local directory)
/// 5. `HIREWIRE_*` environment variables
pub fn load_config() -> Result<HirewireConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<HirewireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HirewireConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HirewireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HirewireConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HirewireConfig::default()))
        .merge(Toml::file("/etc/hirewire/hirewire.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("hirewire/hirewire.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("hirewire.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `HIREWIRE_WEBHOOK_SIGNATURE_TOLERANCE_SECS` must map to
/// `webhook.signature_tolerance_secs`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("HIREWIRE_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("webhook_", "webhook.", 1);
        mapped.into()
    })
}
