//! Persistence for the storefront: pool setup, migrations, row models and
//! repositories.
//!
//! Two engines are supported behind [`DbPool`]. Query text is shared (both
//! accept `$N` placeholders); only the date-part expressions used by the
//! analytics queries differ, see [`dialect`].

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};

use crate::dialect::{PostgresDialect, SalesDialect, SqliteDialect};

/// Run the same query code against whichever engine backs a [`DbPool`].
///
/// The body is expanded once per engine with `$conn` bound to the concrete
/// pool reference, so it must type-check for both.
macro_rules! with_pool {
    ($pool:expr, $conn:ident => $body:expr) => {
        match $pool {
            $crate::DbPool::Postgres($conn) => $body,
            $crate::DbPool::Sqlite($conn) => $body,
        }
    };
}

pub mod dialect;
pub mod models;
pub mod repositories;
pub mod seed;

static POSTGRES_MIGRATOR: Migrator = sqlx::migrate!("./migrations/postgres");
static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");

/// Connection pool for one of the supported engines.
#[derive(Debug, Clone)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DbPool {
    /// Date-part strategy for this engine.
    pub fn dialect(&self) -> &'static dyn SalesDialect {
        match self {
            DbPool::Postgres(_) => &PostgresDialect,
            DbPool::Sqlite(_) => &SqliteDialect,
        }
    }

    pub fn engine(&self) -> &'static str {
        self.dialect().name()
    }

    pub async fn close(&self) {
        with_pool!(self, p => p.close().await)
    }
}

impl From<PgPool> for DbPool {
    fn from(pool: PgPool) -> Self {
        DbPool::Postgres(pool)
    }
}

impl From<SqlitePool> for DbPool {
    fn from(pool: SqlitePool) -> Self {
        DbPool::Sqlite(pool)
    }
}

/// Create a connection pool from a database URL.
///
/// `sqlite:` URLs open (and create if missing) a SQLite file; anything else
/// is handed to the Postgres driver.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    if database_url.starts_with("sqlite:") {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        // Every connection to `:memory:` would otherwise see its own empty database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        return Ok(DbPool::Sqlite(pool));
    }

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await?;
    Ok(DbPool::Postgres(pool))
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    with_pool!(pool, p => {
        sqlx::query("SELECT 1").execute(p).await?;
    });
    Ok(())
}

/// Apply the embedded migrations for the pool's engine.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    match pool {
        DbPool::Postgres(p) => POSTGRES_MIGRATOR.run(p).await,
        DbPool::Sqlite(p) => SQLITE_MIGRATOR.run(p).await,
    }
}
