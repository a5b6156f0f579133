//! Category lifecycle operations
//!
//! Categories are soft-deleted: the row keeps its name for historical
//! statistics until the retention purge removes it for good.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Category, CategoryRef};
use crate::validate;

impl Database {
    /// Create a category, returning its id
    ///
    /// The name is validated (trimmed, non-empty, bounded length); rejection
    /// leaves the store untouched.
    pub fn create_category(&self, user_id: i64, name: &str) -> Result<i64> {
        let name = validate::category_name(name)?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO categories (user_id, name) VALUES (?, ?)",
            params![user_id, name],
        )?;
        let id = conn.last_insert_rowid();
        debug!(user_id, category_id = id, "category created");
        Ok(id)
    }

    /// Look up a category's name, `None` when the row is absent
    pub fn category_name(&self, category_id: i64) -> Result<Option<String>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT name FROM categories WHERE id = ?",
            params![category_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(Into::into)
    }

    /// Rename a category
    ///
    /// The new name passes the same validation as creation. Renaming a
    /// soft-deleted category is allowed; historical statistics rows split on
    /// the name change, which is accepted behavior.
    pub fn rename_category(&self, category_id: i64, new_name: &str) -> Result<()> {
        let new_name = validate::category_name(new_name)?;
        let conn = self.conn()?;

        let updated = conn.execute(
            "UPDATE categories SET name = ? WHERE id = ?",
            params![new_name, category_id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("category {}", category_id)));
        }
        Ok(())
    }

    /// Soft-delete a category: flag it and stamp the deletion time
    ///
    /// Its expenses stay in place for historical statistics; the retention
    /// sweep hard-deletes both once the flag is 30 days old. Re-deleting an
    /// already-deleted category refreshes the timestamp.
    pub fn soft_delete_category(&self, category_id: i64) -> Result<()> {
        let conn = self.conn()?;

        let updated = conn.execute(
            "UPDATE categories SET is_deleted = 1, deleted_at = CURRENT_TIMESTAMP WHERE id = ?",
            params![category_id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("category {}", category_id)));
        }
        debug!(category_id, "category soft-deleted");
        Ok(())
    }

    /// List a user's active categories in creation order
    ///
    /// Soft-deleted categories never appear here, even immediately after
    /// deletion.
    pub fn list_active_categories(&self, user_id: i64) -> Result<Vec<CategoryRef>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name FROM categories WHERE user_id = ? AND is_deleted = 0 ORDER BY id",
        )?;
        let categories = stmt
            .query_map(params![user_id], |row| {
                Ok(CategoryRef {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Get a full category record by id
    pub fn get_category(&self, category_id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, user_id, name, is_deleted, deleted_at, created_at FROM categories WHERE id = ?",
            params![category_id],
            |row| {
                let deleted_at_str: Option<String> = row.get(4)?;
                let created_at_str: String = row.get(5)?;
                Ok(Category {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    is_deleted: row.get(3)?,
                    deleted_at: deleted_at_str.as_deref().map(parse_datetime),
                    created_at: parse_datetime(&created_at_str),
                })
            },
        )
        .optional()
        .map_err(Into::into)
    }
}
