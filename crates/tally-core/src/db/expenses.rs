//! Append-only expense ledger and period aggregations
//!
//! All period queries are half-open: `spent_at` in `[start, end)`.

use chrono::{DateTime, Utc};
use rusqlite::params;
use tracing::debug;

use super::{format_datetime, Database};
use crate::error::Result;
use crate::models::{CategorySpending, RankedCategory, SpendingSummary, TopSpending};
use crate::validate;

impl Database {
    /// Append an expense stamped with the current time, returning its id
    ///
    /// The amount must be a positive finite number; anything else is
    /// rejected without a write. Rows are immutable once written.
    pub fn record_expense(&self, user_id: i64, category_id: i64, amount: f64) -> Result<i64> {
        validate::ensure_positive_amount(amount)?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO expenses (user_id, category_id, amount) VALUES (?, ?, ?)",
            params![user_id, category_id, amount],
        )?;
        let id = conn.last_insert_rowid();
        debug!(user_id, category_id, amount, expense_id = id, "expense recorded");
        Ok(id)
    }

    /// Append an expense with an explicit timestamp
    pub fn record_expense_at(
        &self,
        user_id: i64,
        category_id: i64,
        amount: f64,
        spent_at: DateTime<Utc>,
    ) -> Result<i64> {
        validate::ensure_positive_amount(amount)?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO expenses (user_id, category_id, amount, spent_at) VALUES (?, ?, ?, ?)",
            params![user_id, category_id, amount, format_datetime(spent_at)],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Total spend in `[start, end)`, independent of category deletion status
    pub fn sum_for_period(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64> {
        let conn = self.conn()?;
        let total: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses
             WHERE user_id = ? AND spent_at >= ? AND spent_at < ?",
            params![user_id, format_datetime(start), format_datetime(end)],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Per-category spend in `[start, end)`, ordered by amount descending
    ///
    /// Soft-deleted categories are included and flagged. Grouping is by
    /// `(name, is_deleted)`, so a category renamed or soft-deleted
    /// mid-period splits into separate rows.
    pub fn spending_by_category(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CategorySpending>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT c.name, SUM(e.amount), c.is_deleted
             FROM expenses e
             JOIN categories c ON e.category_id = c.id
             WHERE e.user_id = ? AND e.spent_at >= ? AND e.spent_at < ?
             GROUP BY c.name, c.is_deleted
             ORDER BY SUM(e.amount) DESC",
        )?;
        let rows = stmt
            .query_map(
                params![user_id, format_datetime(start), format_datetime(end)],
                |row| {
                    Ok(CategorySpending {
                        name: row.get(0)?,
                        amount: row.get(1)?,
                        is_deleted: row.get(2)?,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Grand total plus per-category breakdown for one period
    pub fn spending_summary(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<SpendingSummary> {
        Ok(SpendingSummary {
            total: self.sum_for_period(user_id, start, end)?,
            by_category: self.spending_by_category(user_id, start, end)?,
        })
    }

    /// Top `n` categories by spend in `[start, end)`, remainder folded into
    /// `other_sum`
    ///
    /// Only non-deleted categories are eligible for ranking. Ties break on
    /// the stable `ORDER BY amount DESC, name` output.
    pub fn top_spending(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        n: usize,
    ) -> Result<TopSpending> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT c.name, SUM(e.amount) AS total
             FROM expenses e
             JOIN categories c ON e.category_id = c.id
             WHERE e.user_id = ? AND e.spent_at >= ? AND e.spent_at < ?
               AND c.is_deleted = 0
             GROUP BY c.id, c.name
             ORDER BY total DESC, c.name",
        )?;
        let ranked = stmt
            .query_map(
                params![user_id, format_datetime(start), format_datetime(end)],
                |row| {
                    Ok(RankedCategory {
                        name: row.get(0)?,
                        amount: row.get(1)?,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let other_sum: f64 = ranked.iter().skip(n).map(|r| r.amount).sum();
        let mut top = ranked;
        top.truncate(n);

        Ok(TopSpending { top, other_sum })
    }
}
