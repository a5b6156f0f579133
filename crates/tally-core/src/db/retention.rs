//! Retention purge of expired soft-deleted categories
//!
//! Categories soft-deleted more than the retention window ago are
//! hard-deleted together with their expenses. Expenses go first so the
//! category row never dangles mid-run; both deletes commit as one
//! transaction, making the purge idempotent and safe to crash mid-run.

use chrono::{Duration, Utc};
use rusqlite::params;
use tracing::info;

use super::{format_datetime, Database};
use crate::error::Result;
use crate::models::PurgeResult;

/// Days a soft-deleted category survives before the sweep removes it
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

impl Database {
    /// Hard-delete categories soft-deleted more than `retention_days` ago,
    /// expenses first, in one transaction
    ///
    /// A category with `deleted_at` 29 days old is untouched; 31 days old is
    /// purged along with all its expenses.
    pub fn purge_deleted_categories(&self, retention_days: i64) -> Result<PurgeResult> {
        let cutoff = format_datetime(Utc::now() - Duration::days(retention_days));
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let expenses_deleted = tx.execute(
            "DELETE FROM expenses
             WHERE category_id IN (
                 SELECT id FROM categories
                 WHERE is_deleted = 1
                   AND deleted_at IS NOT NULL
                   AND deleted_at < ?
             )",
            params![cutoff],
        )?;

        let categories_deleted = tx.execute(
            "DELETE FROM categories
             WHERE is_deleted = 1
               AND deleted_at IS NOT NULL
               AND deleted_at < ?",
            params![cutoff],
        )?;

        tx.commit()?;

        let result = PurgeResult {
            expenses_deleted,
            categories_deleted,
        };
        if !result.is_empty() {
            info!(
                expenses = result.expenses_deleted,
                categories = result.categories_deleted,
                "retention purge removed expired soft-deleted categories"
            );
        }
        Ok(result)
    }
}
