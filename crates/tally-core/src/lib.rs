//! Tally Core Library
//!
//! Shared functionality for the Tally expense-tracking chat bot:
//! - Database access and migrations (users, categories, expenses)
//! - Category lifecycle with soft deletion and retention purge
//! - Append-only expense ledger with period aggregations
//! - Input validation for category names and amounts
//! - Statistics periods and chart-ready dataset aggregation

pub mod db;
pub mod error;
pub mod models;
pub mod period;
pub mod report;
pub mod validate;

pub use db::{Database, DEFAULT_RETENTION_DAYS};
pub use error::{Error, Result};
pub use models::{
    Category, CategoryRef, CategorySpending, ChatProfile, Expense, PurgeResult, RankedCategory,
    SpendingSummary, TopSpending, User,
};
pub use period::{time_window, PeriodKind};
pub use report::{bar_chart_pages, pie_chart, BarChartPage, BarChartPoint, PieChart, PieSlice};
