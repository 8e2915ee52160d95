//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::DomainError;

/// Connection shared by all repositories; `None` until initialized
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone, Default)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_ready(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::Internal(err.to_string())
    }
}

/// Initialize database with path (":memory:" for tests)
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = Connection::open(db_path).map_err(|e| format!("Failed to open db: {}", e))?;

    run_migrations(&conn)?;

    let state = DbState::new();
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(names) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };
    names.flatten().any(|name| name == column)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            image TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            category_id TEXT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            image TEXT NOT NULL,
            decompose_time TEXT NOT NULL,
            results TEXT,
            benefits TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_items_category ON items(category_id);

        CREATE TABLE IF NOT EXISTS users (
            uid TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            avatar TEXT NOT NULL DEFAULT '',
            score INTEGER NOT NULL DEFAULT 0
        );",
    )
    .map_err(|e| e.to_string())?;

    // Added after the first release
    if !column_exists(conn, "users", "last_updated_at") {
        conn.execute("ALTER TABLE users ADD COLUMN last_updated_at INTEGER NOT NULL DEFAULT 0", [])
            .map_err(|e| format!("Failed to add last_updated_at: {}", e))?;
    }

    conn.execute("CREATE INDEX IF NOT EXISTS idx_users_score ON users(score DESC)", [])
        .map_err(|e| e.to_string())?;

    Ok(())
}
