//! Item Repository
//!
//! SQLite-backed implementation for Item CRUD operations.
//! `results` and `benefits` are stored as JSON arrays.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Item};
use super::db::SharedConnection;
use super::traits::Repository;

const ITEM_COLUMNS: &str = "id, category_id, name, image, decompose_time, results, benefits";

/// SQLite implementation of Item repository
pub struct ItemRepository {
    conn: SharedConnection,
}

impl ItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Items of one category, sorted by name
    pub async fn list_by_category(&self, category_id: &str) -> DomainResult<Vec<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let query = format!(
            "SELECT {} FROM items WHERE category_id = ? ORDER BY name COLLATE NOCASE ASC",
            ITEM_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let mut rows = stmt.query(params![category_id])?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(row_to_item(row)?);
        }
        Ok(items)
    }
}

fn ensure_category(conn: &Connection, category_id: &str) -> DomainResult<()> {
    let exists = conn
        .query_row("SELECT 1 FROM categories WHERE id = ?", params![category_id], |_| Ok(()))
        .optional()?;
    match exists {
        Some(()) => Ok(()),
        None => Err(DomainError::InvalidInput(format!("unknown category {}", category_id))),
    }
}

fn to_json(lines: &Option<Vec<String>>) -> DomainResult<Option<String>> {
    lines
        .as_ref()
        .map(|lines| serde_json::to_string(lines).map_err(|e| DomainError::Internal(e.to_string())))
        .transpose()
}

fn from_json(raw: Option<String>) -> DomainResult<Option<Vec<String>>> {
    raw.map(|raw| serde_json::from_str(&raw).map_err(|e| DomainError::Internal(e.to_string())))
        .transpose()
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        entity.validate()?;
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        ensure_category(conn, &entity.category_id)?;
        conn.execute(
            "INSERT INTO items (id, category_id, name, image, decompose_time, results, benefits)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.id,
                entity.category_id,
                entity.name.trim(),
                entity.image,
                entity.decompose_time.trim(),
                to_json(&entity.results)?,
                to_json(&entity.benefits)?,
            ],
        )?;

        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: String) -> DomainResult<Option<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let query = format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS);
        let mut stmt = conn.prepare(&query)?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(row_to_item(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let query = format!("SELECT {} FROM items ORDER BY name COLLATE NOCASE ASC", ITEM_COLUMNS);
        let mut stmt = conn.prepare(&query)?;
        let mut rows = stmt.query([])?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(row_to_item(row)?);
        }
        Ok(items)
    }

    async fn update(&self, entity: &Item) -> DomainResult<Item> {
        entity.validate()?;
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        ensure_category(conn, &entity.category_id)?;
        let changed = conn.execute(
            "UPDATE items SET category_id = ?, name = ?, image = ?, decompose_time = ?, results = ?, benefits = ?
             WHERE id = ?",
            params![
                entity.category_id,
                entity.name.trim(),
                entity.image,
                entity.decompose_time.trim(),
                to_json(&entity.results)?,
                to_json(&entity.benefits)?,
                entity.id,
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("item {}", entity.id)));
        }

        Ok(entity.clone())
    }

    async fn delete(&self, id: String) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let changed = conn.execute("DELETE FROM items WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("item {}", id)));
        }
        Ok(())
    }
}

/// Convert a database row to Item
fn row_to_item(row: &rusqlite::Row) -> DomainResult<Item> {
    Ok(Item {
        id: row.get(0)?,
        category_id: row.get(1)?,
        name: row.get(2)?,
        image: row.get(3)?,
        decompose_time: row.get(4)?,
        results: from_json(row.get(5)?)?,
        benefits: from_json(row.get(6)?)?,
    })
}
