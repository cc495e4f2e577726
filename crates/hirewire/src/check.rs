// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hirewire check-config` command implementation.
//!
//! Reports on the loaded configuration and opens the database (applying
//! pending migrations) without starting the server.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use hirewire_config::HirewireConfig;
use hirewire_core::HirewireError;
use hirewire_storage::Database;

/// Status of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Runs every check and prints a report. Fails when any check fails.
pub async fn run_check_config(config: &HirewireConfig, plain: bool) -> Result<(), HirewireError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_webhook_secret(config),
        check_bearer_token(config),
        check_database(&config.storage.database_path, config.storage.wal_mode).await,
    ];

    println!();
    println!("  hirewire check-config");
    println!("  {}", "-".repeat(50));
    println!(
        "    listen {}:{}, log level {}",
        config.server.host, config.server.port, config.server.log_level
    );
    for result in &results {
        println!("{}", format_line(result, use_color));
    }
    println!();

    let failures = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warnings = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();

    if failures + warnings == 0 {
        println!("  All checks passed.");
    } else {
        let issues = failures + warnings;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    }
    println!();

    if failures > 0 {
        return Err(HirewireError::Config(format!("{failures} check(s) failed")));
    }
    Ok(())
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

fn check_webhook_secret(config: &HirewireConfig) -> CheckResult {
    let start = Instant::now();
    let configured = config
        .webhook
        .secret
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());
    let (status, message) = if configured {
        (
            CheckStatus::Pass,
            format!(
                "set, tolerance {}s",
                config.webhook.signature_tolerance_secs
            ),
        )
    } else {
        (
            CheckStatus::Warn,
            "not set; webhook deliveries will be refused with 500".to_string(),
        )
    };
    CheckResult {
        name: "Webhook secret",
        status,
        message,
        duration: start.elapsed(),
    }
}

fn check_bearer_token(config: &HirewireConfig) -> CheckResult {
    let start = Instant::now();
    let (status, message) = match config.server.bearer_token.as_deref() {
        Some(token) if !token.trim().is_empty() => (CheckStatus::Pass, "set".to_string()),
        _ => (
            CheckStatus::Warn,
            "not set; /v1 API will reject every request".to_string(),
        ),
    };
    CheckResult {
        name: "API bearer token",
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Opens (and migrates) the database, then counts stored conversations.
async fn check_database(path: &str, wal_mode: bool) -> CheckResult {
    let start = Instant::now();
    let outcome = async {
        let db = Database::open_with(path, wal_mode).await?;
        let count = db
            .transact(|tx| {
                tx.query_row("SELECT COUNT(*) FROM conversations", [], |row| {
                    row.get::<_, i64>(0)
                })
            })
            .await;
        db.close().await?;
        count
    }
    .await;

    let (status, message) = match outcome {
        Ok(count) => (
            CheckStatus::Pass,
            format!("{path} ({count} conversations)"),
        ),
        Err(e) => (CheckStatus::Fail, format!("{path}: {e}")),
    };
    CheckResult {
        name: "Database",
        status,
        message,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_is_a_warning() {
        let config = HirewireConfig::default();
        assert_eq!(check_webhook_secret(&config).status, CheckStatus::Warn);
        assert_eq!(check_bearer_token(&config).status, CheckStatus::Warn);
    }

    #[test]
    fn configured_secret_passes() {
        let mut config = HirewireConfig::default();
        config.webhook.secret = Some("wsec_abc".into());
        let result = check_webhook_secret(&config);
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(!result.message.contains("wsec_abc"));
    }

    #[test]
    fn plain_lines_use_bracket_tags() {
        let result = CheckResult {
            name: "Database",
            status: CheckStatus::Fail,
            message: "locked".into(),
            duration: Duration::from_millis(3),
        };
        let line = format_line(&result, false);
        assert!(line.contains("[FAIL]"));
        assert!(line.contains("locked (3ms)"));
    }

    #[tokio::test]
    async fn database_check_creates_and_migrates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("check.db");
        let result = check_database(&path.to_string_lossy(), true).await;
        assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
        assert!(result.message.contains("0 conversations"));
    }
}
