//! Catalog database setup
//!
//! Opens (or creates) the SQLite catalog and ensures the two tables the
//! search path reads from exist. Row CRUD lives outside this service;
//! only the narrow query surface in `services::catalog` touches the data.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS songs (
        id        TEXT PRIMARY KEY,
        title     TEXT NOT NULL,
        artist    TEXT NOT NULL,
        album     TEXT,
        image_url TEXT,
        song_url  TEXT,
        duration  REAL
    );
    CREATE TABLE IF NOT EXISTS podcasts (
        id          TEXT PRIMARY KEY,
        title       TEXT NOT NULL,
        publisher   TEXT,
        image_url   TEXT,
        description TEXT
    );
";

/// Open the catalog database, creating file and schema if missing
pub async fn connect(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;
    sqlx::raw_sql(SCHEMA).execute(&pool).await?;
    Ok(pool)
}

/// In-memory catalog with schema applied (tests)
///
/// Pinned to one connection that never recycles: every pooled connection
/// to `:memory:` would otherwise see its own empty database.
pub async fn connect_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    sqlx::raw_sql(SCHEMA).execute(&pool).await?;
    Ok(pool)
}
