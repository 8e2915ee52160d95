//! Category Repository
//!
//! SQLite-backed implementation for Category CRUD operations.
//! Deleting a category cascades to its items.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{Category, DomainError, DomainResult};
use super::db::SharedConnection;
use super::traits::Repository;

/// SQLite implementation of Category repository
pub struct CategoryRepository {
    conn: SharedConnection,
}

impl CategoryRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Category> for CategoryRepository {
    async fn create(&self, entity: &Category) -> DomainResult<Category> {
        entity.validate()?;
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT INTO categories (id, name, image) VALUES (?, ?, ?)",
            params![entity.id, entity.name.trim(), entity.image],
        )?;

        let mut category = entity.clone();
        category.name = entity.name.trim().to_string();
        Ok(category)
    }

    async fn find_by_id(&self, id: String) -> DomainResult<Option<Category>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn.prepare("SELECT id, name, image FROM categories WHERE id = ?")?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(row_to_category(row)?)),
            None => Ok(None),
        }
    }

    /// All categories, sorted by name
    async fn list(&self) -> DomainResult<Vec<Category>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn.prepare("SELECT id, name, image FROM categories ORDER BY name COLLATE NOCASE ASC")?;
        let mut rows = stmt.query([])?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(row_to_category(row)?);
        }
        Ok(categories)
    }

    async fn update(&self, entity: &Category) -> DomainResult<Category> {
        entity.validate()?;
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let changed = conn.execute(
            "UPDATE categories SET name = ?, image = ? WHERE id = ?",
            params![entity.name.trim(), entity.image, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("category {}", entity.id)));
        }

        Ok(entity.clone())
    }

    async fn delete(&self, id: String) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let changed = conn.execute("DELETE FROM categories WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("category {}", id)));
        }
        Ok(())
    }
}

/// Convert a database row to Category
fn row_to_category(row: &rusqlite::Row) -> DomainResult<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        image: row.get(2)?,
    })
}
