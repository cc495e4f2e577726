// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.
//!
//! Each module exposes synchronous functions over `&rusqlite::Connection` so
//! they compose inside a single [`crate::Database::transact`] unit of work,
//! plus async wrappers taking `&Database` for one-off reads.

pub mod conversations;
pub mod follow_ups;
pub mod messages;

use rusqlite::types::Type;

/// Parses a stored enum column, surfacing bad values as a conversion failure.
pub(crate) fn parse_column<T>(idx: usize, raw: String) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
