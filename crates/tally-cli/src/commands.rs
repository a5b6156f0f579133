//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use tracing::info;

use tally_core::{
    bar_chart_pages, pie_chart, time_window, Database, PeriodKind, DEFAULT_RETENTION_DAYS,
};

/// Default database location: `<data dir>/tally/tally.db`
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally")
        .join("tally.db")
}

/// Open the database, creating parent directories for the default path
pub fn open_db(path: Option<&Path>, no_encrypt: bool) -> Result<Database> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_db_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow!("database path is not valid UTF-8: {}", path.display()))?;

    let db = if no_encrypt {
        Database::new_unencrypted(path_str)?
    } else {
        Database::new(path_str)?
    };
    Ok(db)
}

/// Resolve a chat identity to the internal user id
fn resolve_user(db: &Database, chat_id: i64) -> Result<i64> {
    db.find_user_by_chat_id(chat_id)?
        .ok_or_else(|| anyhow!("no user with chat id {} (they never ran /start)", chat_id))
}

pub fn cmd_init(db_path: Option<&Path>, no_encrypt: bool) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;
    info!("Database initialized at {}", db.path());
    println!("Database ready: {}", db.path());
    Ok(())
}

pub fn cmd_sweep(
    db_path: Option<&Path>,
    no_encrypt: bool,
    retention_days: Option<i64>,
) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;
    let retention_days = retention_days.unwrap_or(DEFAULT_RETENTION_DAYS);

    let result = db.purge_deleted_categories(retention_days)?;
    println!(
        "Purged {} expenses and {} categories (retention: {} days)",
        result.expenses_deleted, result.categories_deleted, retention_days
    );
    Ok(())
}

pub fn cmd_categories(db_path: Option<&Path>, no_encrypt: bool, chat_id: i64) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;
    let user_id = resolve_user(&db, chat_id)?;

    let categories = db.list_active_categories(user_id)?;
    if categories.is_empty() {
        println!("No active categories");
        return Ok(());
    }
    for category in categories {
        println!("{:>6}  {}", category.id, category.name);
    }
    Ok(())
}

pub fn cmd_stats(
    db_path: Option<&Path>,
    no_encrypt: bool,
    chat_id: i64,
    period: &str,
    top: bool,
) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;
    let user_id = resolve_user(&db, chat_id)?;

    let kind: PeriodKind = period
        .parse()
        .map_err(|e: String| anyhow!(e))
        .context("period must be 'week' or 'month'")?;
    let (start, end) = time_window(kind, Utc::now());

    let json = if top {
        let top_spending = db.top_spending(user_id, start, end, 3)?;
        match pie_chart(&top_spending, "Other") {
            Some(chart) => serde_json::to_string_pretty(&chart)?,
            None => {
                println!("No spending recorded in the selected period");
                return Ok(());
            }
        }
    } else {
        let summary = db.spending_summary(user_id, start, end)?;
        let pages = bar_chart_pages(&summary.by_category, summary.total);
        if pages.is_empty() {
            println!("No spending recorded in the selected period");
            return Ok(());
        }
        serde_json::to_string_pretty(&pages)?
    };

    println!("{}", json);
    Ok(())
}
