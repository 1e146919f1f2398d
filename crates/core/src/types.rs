/// Primary keys are BIGSERIAL on Postgres and INTEGER PRIMARY KEY on SQLite.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
