//! Engine-specific date-part SQL for the analytics queries.
//!
//! The analytics repository only ever speaks in calendar months (1..=12)
//! and weekdays with 0 = Sunday. Each engine extracts those differently and
//! Postgres counts weekdays ISO-style, so every [`SalesDialect`] both
//! renders the expression and normalizes what comes back.

use watchstore_core::analytics::{weekday_from_iso, weekday_from_sunday_zero};

pub trait SalesDialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Expression for the calendar month (1..=12, UTC) of `column`, as a 64-bit integer.
    fn month_of(&self, column: &str) -> String;

    /// Expression for the engine-native weekday number of `column`, as a 64-bit integer.
    fn weekday_of(&self, column: &str) -> String;

    /// Map a value produced by [`weekday_of`](Self::weekday_of) to 0 = Sunday.
    fn normalize_weekday(&self, raw: i64) -> Option<u32>;

    /// Predicate: timestamp `column` is at or after the timestamp bound at `param`.
    fn at_or_after(&self, column: &str, param: &str) -> String;
}

/// `EXTRACT` on `TIMESTAMPTZ`; `ISODOW` gives 1 = Monday .. 7 = Sunday.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl SalesDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn month_of(&self, column: &str) -> String {
        format!("EXTRACT(MONTH FROM {column} AT TIME ZONE 'UTC')::BIGINT")
    }

    fn weekday_of(&self, column: &str) -> String {
        format!("EXTRACT(ISODOW FROM {column} AT TIME ZONE 'UTC')::BIGINT")
    }

    fn normalize_weekday(&self, raw: i64) -> Option<u32> {
        weekday_from_iso(raw)
    }

    fn at_or_after(&self, column: &str, param: &str) -> String {
        format!("{column} >= {param}")
    }
}

/// `strftime` over RFC 3339 text; `%w` already gives 0 = Sunday.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SalesDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn month_of(&self, column: &str) -> String {
        format!("CAST(strftime('%m', {column}) AS INTEGER)")
    }

    fn weekday_of(&self, column: &str) -> String {
        format!("CAST(strftime('%w', {column}) AS INTEGER)")
    }

    fn normalize_weekday(&self, raw: i64) -> Option<u32> {
        weekday_from_sunday_zero(raw)
    }

    // Timestamps are stored as text; compare as Julian day numbers so that
    // differing fractional-second precision cannot skew the result.
    fn at_or_after(&self, column: &str, param: &str) -> String {
        format!("julianday({column}) >= julianday({param})")
    }
}
