//! SQLite-backed storage for the listings server.
//!
//! Three tables: `requests` (feature requests), `likes` (one row per client
//! per request), `printing_services` (community print offers). Timestamps
//! are Unix milliseconds throughout.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Shared connection pool, cloned into every handler.
#[derive(Debug, Clone)]
pub struct Db {
    pub pool: SqlitePool,
}

impl Db {
    /// Opens (or creates) the database in the XDG state directory.
    pub async fn open_default() -> Result<Db> {
        let xdg_dirs =
            xdg::BaseDirectories::with_prefix("adkit").context("resolve XDG base directories")?;
        let state_dir = xdg_dirs.get_state_home();
        std::fs::create_dir_all(&state_dir)
            .with_context(|| format!("create state directory {}", state_dir.display()))?;
        Self::open_at(&state_dir.join("listings.db")).await
    }

    /// Opens (or creates) the database at an explicit path.
    pub async fn open_at(path: &Path) -> Result<Db> {
        let uri = path_to_sqlite_uri(path);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&uri)
            .await
            .with_context(|| format!("open listings database {}", path.display()))?;
        migrate(&pool).await?;
        Ok(Db { pool })
    }

    /// In-memory database for tests. A single connection, otherwise every
    /// pool checkout would see a fresh empty database.
    #[cfg(test)]
    pub async fn open_memory() -> Result<Db> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("open in-memory database")?;
        migrate(&pool).await?;
        Ok(Db { pool })
    }
}

fn path_to_sqlite_uri(path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS requests (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            timestamp INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("create requests table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS likes (
            request_id TEXT NOT NULL,
            client_id TEXT NOT NULL,
            timestamp INTEGER NOT NULL,
            UNIQUE(request_id, client_id)
        )",
    )
    .execute(pool)
    .await
    .context("create likes table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS printing_services (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            postal_code TEXT NOT NULL,
            printers TEXT NOT NULL,
            hourly_rate TEXT NOT NULL,
            email TEXT NOT NULL,
            timestamp INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("create printing_services table")?;

    Ok(())
}

/// Current time as Unix milliseconds, the format the web clients expect.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
