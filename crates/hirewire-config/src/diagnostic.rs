// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Miette diagnostics for configuration errors.
//!
//! The config file has three sections, `[server]`, `[storage]` and
//! `[webhook]`, layered over compiled defaults. Loading can therefore only
//! fail on an unrecognized section or key, a value of the wrong type, or a
//! file that is not TOML at all. Validation failures are reported separately
//! after a successful load.

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source name used for configuration parsed from an in-memory string.
pub const INLINE_SOURCE: &str = "<inline>";

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const SIMILARITY_FLOOR: f64 = 0.75;

/// A configuration problem, renderable with source context.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A table header that is not one of the hirewire sections.
    #[error("unknown section `[{section}]`")]
    #[diagnostic(
        code(hirewire::config::unknown_section),
        help("{}", hint(suggestion.as_deref(), valid))
    )]
    UnknownSection {
        section: String,
        suggestion: Option<String>,
        /// Comma-separated section names.
        valid: String,
        #[label("not a hirewire section")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A key the section does not define.
    #[error("unknown key `{key}` in [{section}]")]
    #[diagnostic(
        code(hirewire::config::unknown_key),
        help("{}", hint(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        section: String,
        key: String,
        suggestion: Option<String>,
        /// Comma-separated keys of the section.
        valid_keys: String,
        #[label("not recognized here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that does not deserialize into the key's type.
    #[error("`{key}` should be {expected}, found {found}")]
    #[diagnostic(code(hirewire::config::invalid_type))]
    InvalidType {
        /// Dotted path, e.g. `server.port`.
        key: String,
        found: String,
        expected: String,
        #[label("wrong type")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A well-typed value that breaks a semantic rule.
    #[error("invalid setting: {message}")]
    #[diagnostic(code(hirewire::config::validation))]
    Validation { message: String },

    /// The file could not be read as TOML.
    #[error("cannot read configuration: {0}")]
    #[diagnostic(
        code(hirewire::config::unreadable),
        help("check the TOML syntax of hirewire.toml")
    )]
    Unreadable(String),
}

fn hint(suggestion: Option<&str>, valid: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? expected one of: {valid}"),
        None => format!("expected one of: {valid}"),
    }
}

/// Converts every error inside a `figment::Error` into a [`ConfigError`].
///
/// `toml_sources` pairs a source name with its content; spans are attached
/// when the failing value came from one of them.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| {
            let path: Vec<&str> = error.path.iter().map(String::as_str).collect();
            match (&error.kind, path.as_slice()) {
                (Kind::UnknownField(name, expected), []) => {
                    let (span, src) = locate(&error, toml_sources, name.len(), |content| {
                        header_offset(content, name)
                    });
                    ConfigError::UnknownSection {
                        section: name.clone(),
                        suggestion: closest_key(name, expected),
                        valid: expected.join(", "),
                        span,
                        src,
                    }
                }
                (Kind::UnknownField(name, expected), section) => {
                    let section = section.join(".");
                    let (span, src) = locate(&error, toml_sources, name.len(), |content| {
                        key_offset(content, Some(section.as_str()), name)
                    });
                    ConfigError::UnknownKey {
                        section,
                        key: name.clone(),
                        suggestion: closest_key(name, expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                (Kind::InvalidType(actual, expected), [.., last]) => {
                    let section = path.split_last().map(|(_, rest)| rest.join("."));
                    let section = section.filter(|s| !s.is_empty());
                    let (span, src) = locate(&error, toml_sources, last.len(), |content| {
                        key_offset(content, section.as_deref(), last)
                    });
                    ConfigError::InvalidType {
                        key: path.join("."),
                        found: actual.to_string(),
                        expected: expected.clone(),
                        span,
                        src,
                    }
                }
                _ => ConfigError::Unreadable(error.to_string()),
            }
        })
        .collect()
}

/// Finds the source the failing value came from and runs `find` over it.
///
/// Figment tags values merged over the compiled defaults with the defaults'
/// metadata, so a lone source is searched even when the tag names no file.
fn locate(
    error: &figment::error::Error,
    toml_sources: &[(String, String)],
    len: usize,
    find: impl FnOnce(&str) -> Option<usize>,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let wanted = match error.metadata.as_ref().and_then(|m| m.source.as_ref()) {
        Some(figment::Source::File(path)) => path.display().to_string(),
        _ => INLINE_SOURCE.to_string(),
    };
    let source = toml_sources
        .iter()
        .find(|(name, _)| *name == wanted)
        .or(match toml_sources {
            [only] => Some(only),
            _ => None,
        });
    let Some((name, content)) = source else {
        return (None, None);
    };
    match find(content) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), len)),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Lines of `content` paired with their byte offset.
fn lines_with_offsets(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// Section named by a `[header]` line, if `line` is one.
fn header_name(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

/// Byte offset of the name inside the `[section]` header line.
pub fn header_offset(content: &str, section: &str) -> Option<usize> {
    lines_with_offsets(content).find_map(|(start, line)| {
        (header_name(line) == Some(section))
            .then(|| line.find(section).map(|col| start + col))
            .flatten()
    })
}

/// Byte offset of `key = ...` inside `section`, or before the first header
/// when `section` is `None`.
///
/// The search stops at the next header, so a key of the same name in a later
/// section is never reported.
pub fn key_offset(content: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let mut current: Option<&str> = None;
    for (start, line) in lines_with_offsets(content) {
        if let Some(name) = header_name(line) {
            current = Some(name);
            continue;
        }
        if current != section {
            continue;
        }
        let indent = line.len() - line.trim_start().len();
        let rest = &line[indent..];
        if let Some(after) = rest.strip_prefix(key)
            && after.trim_start().starts_with('=')
        {
            return Some(start + indent);
        }
    }
    None
}

/// The closest candidate to `unknown`, when it is similar enough to be a typo.
pub fn closest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|c| (*c, strsim::jaro_winkler(unknown, c)))
        .filter(|(_, score)| *score >= SIMILARITY_FLOOR)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c.to_string())
}

/// Prints each error to stderr using miette's graphical report handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}
