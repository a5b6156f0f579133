//! Domain models for Tally

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered chat user
///
/// `id` is the stable internal key referenced by categories and expenses;
/// `chat_id` is the external chat-platform identity the user arrives with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile fields delivered with a chat "start" interaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A spending category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Soft-deleted categories stay joinable for historical statistics
    /// until the retention sweep hard-deletes them.
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Minimal category view used for selection keyboards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

/// A single expense row (append-only, immutable once written)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: f64,
    pub spent_at: DateTime<Utc>,
}

/// Per-category spend over a period
///
/// Grouped by `(name, is_deleted)`: a category renamed or soft-deleted
/// mid-period splits into separate rows, which is accepted behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpending {
    pub name: String,
    pub amount: f64,
    pub is_deleted: bool,
}

/// Full statistics for a period: grand total plus per-category breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub total: f64,
    pub by_category: Vec<CategorySpending>,
}

/// One ranked entry of a top-N query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCategory {
    pub name: String,
    pub amount: f64,
}

/// Top-N spending with the remainder folded into one bucket
///
/// Only non-deleted categories are eligible for ranking; `other_sum` is 0.0
/// when nothing falls beyond rank N.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSpending {
    pub top: Vec<RankedCategory>,
    pub other_sum: f64,
}

/// Row counts from a retention purge
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PurgeResult {
    pub expenses_deleted: usize,
    pub categories_deleted: usize,
}

impl PurgeResult {
    pub fn is_empty(&self) -> bool {
        self.expenses_deleted == 0 && self.categories_deleted == 0
    }
}
