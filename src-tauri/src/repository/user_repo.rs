//! User Score Repository
//!
//! SQLite-backed storage for per-user score records and the leaderboard query.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, UserRecord, MAX_LEADERBOARD};
use super::db::SharedConnection;
use super::traits::Repository;

const USER_COLUMNS: &str = "uid, display_name, avatar, score, last_updated_at";

/// SQLite implementation of the user score store
pub struct UserRepository {
    conn: SharedConnection,
}

impl UserRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Overwrite a user's score
    pub async fn update_score(&self, uid: &str, score: u64) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let changed = conn.execute(
            "UPDATE users SET score = ?, last_updated_at = ? WHERE uid = ?",
            params![score as i64, chrono::Utc::now().timestamp_millis(), uid],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("user {}", uid)));
        }
        Ok(())
    }

    /// Highest positive scores first, at most `limit` (capped at [`MAX_LEADERBOARD`])
    pub async fn top_scores(&self, limit: u32) -> DomainResult<Vec<UserRecord>> {
        let limit = limit.clamp(1, MAX_LEADERBOARD);
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let query = format!(
            "SELECT {} FROM users WHERE score > 0 ORDER BY score DESC, last_updated_at ASC LIMIT ?",
            USER_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let mut rows = stmt.query(params![limit])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(row_to_user(row)?);
        }
        Ok(records)
    }
}

#[async_trait]
impl Repository<UserRecord> for UserRepository {
    async fn create(&self, entity: &UserRecord) -> DomainResult<UserRecord> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT INTO users (uid, display_name, avatar, score, last_updated_at) VALUES (?, ?, ?, ?, ?)",
            params![
                entity.uid,
                entity.display_name,
                entity.avatar,
                entity.score as i64,
                entity.last_updated_at,
            ],
        )?;

        Ok(entity.clone())
    }

    async fn find_by_id(&self, uid: String) -> DomainResult<Option<UserRecord>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let query = format!("SELECT {} FROM users WHERE uid = ?", USER_COLUMNS);
        let mut stmt = conn.prepare(&query)?;
        let mut rows = stmt.query(params![uid])?;

        match rows.next()? {
            Some(row) => Ok(Some(row_to_user(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<UserRecord>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let query = format!("SELECT {} FROM users ORDER BY display_name COLLATE NOCASE", USER_COLUMNS);
        let mut stmt = conn.prepare(&query)?;
        let mut rows = stmt.query([])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(row_to_user(row)?);
        }
        Ok(records)
    }

    /// Refresh display name and avatar; the score only changes through `update_score`
    async fn update(&self, entity: &UserRecord) -> DomainResult<UserRecord> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let changed = conn.execute(
            "UPDATE users SET display_name = ?, avatar = ? WHERE uid = ?",
            params![entity.display_name, entity.avatar, entity.uid],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("user {}", entity.uid)));
        }
        Ok(entity.clone())
    }

    /// Idempotent: deleting an unknown uid is not an error
    async fn delete(&self, uid: String) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute("DELETE FROM users WHERE uid = ?", params![uid])?;
        Ok(())
    }
}

/// Convert a database row to UserRecord
fn row_to_user(row: &rusqlite::Row) -> DomainResult<UserRecord> {
    let score: i64 = row.get(3)?;
    Ok(UserRecord {
        uid: row.get(0)?,
        display_name: row.get(1)?,
        avatar: row.get(2)?,
        score: score.max(0) as u64,
        last_updated_at: row.get(4)?,
    })
}
