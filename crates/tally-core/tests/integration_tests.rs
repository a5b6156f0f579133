//! Integration tests for tally-core
//!
//! These tests exercise the full register -> categorize -> spend ->
//! aggregate -> purge workflow against a real database.

use chrono::{Duration, TimeZone, Utc};

use tally_core::{
    bar_chart_pages, pie_chart,
    db::Database,
    models::ChatProfile,
    period::{time_window, PeriodKind},
};

fn seeded_db() -> (Database, i64) {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let user_id = db
        .upsert_user(
            5001,
            &ChatProfile {
                username: Some("spender".into()),
                first_name: Some("Sam".into()),
                last_name: None,
            },
        )
        .expect("Failed to upsert user");
    (db, user_id)
}

#[test]
fn test_full_spending_workflow() {
    let (db, user_id) = seeded_db();

    let rent = db.create_category(user_id, "Rent").unwrap();
    let food = db.create_category(user_id, "Food").unwrap();
    let fun = db.create_category(user_id, "Fun").unwrap();

    let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    let mid = start + Duration::days(10);

    db.record_expense_at(user_id, rent, 900.0, mid).unwrap();
    db.record_expense_at(user_id, food, 250.0, mid).unwrap();
    db.record_expense_at(user_id, food, 50.0, mid).unwrap();
    db.record_expense_at(user_id, fun, 75.0, mid).unwrap();

    let summary = db.spending_summary(user_id, start, end).unwrap();
    assert_eq!(summary.total, 1275.0);
    assert_eq!(summary.by_category.len(), 3);
    assert_eq!(summary.by_category[0].name, "Rent");

    // Chart pages: 3 bars fit one page, ascending
    let pages = bar_chart_pages(&summary.by_category, summary.total);
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].points[0].label, "Fun");
    assert_eq!(pages[0].grand_total, Some(1275.0));

    // Top-2 with the remainder folded
    let top = db.top_spending(user_id, start, end, 2).unwrap();
    assert_eq!(top.top.len(), 2);
    assert_eq!(top.other_sum, 75.0);
    let pie = pie_chart(&top, "Other").unwrap();
    assert_eq!(pie.slices.len(), 3);
    assert_eq!(pie.slices[2].label, "Other");
}

#[test]
fn test_soft_delete_keeps_history_until_purged() {
    let (db, user_id) = seeded_db();

    let cafes = db.create_category(user_id, "Cafes").unwrap();
    db.record_expense(user_id, cafes, 18.0).unwrap();
    db.soft_delete_category(cafes).unwrap();

    // Gone from pickers, still present in statistics
    assert!(db.list_active_categories(user_id).unwrap().is_empty());
    let (start, end) = time_window(PeriodKind::Week, Utc::now());
    let rows = db.spending_by_category(user_id, start, end).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_deleted);

    // Within the retention window nothing is purged
    let result = db.purge_deleted_categories(30).unwrap();
    assert!(result.is_empty());
    assert!(db.get_category(cafes).unwrap().is_some());
}

#[test]
fn test_statistics_window_covers_current_day() {
    let (db, user_id) = seeded_db();
    let groceries = db.create_category(user_id, "Groceries").unwrap();

    // Stamped with CURRENT_TIMESTAMP, i.e. "now"
    db.record_expense(user_id, groceries, 33.0).unwrap();

    let (start, end) = time_window(PeriodKind::Week, Utc::now());
    assert_eq!(db.sum_for_period(user_id, start, end).unwrap(), 33.0);
}

#[test]
fn test_users_are_isolated() {
    let (db, first) = seeded_db();
    let second = db.upsert_user(5002, &ChatProfile::default()).unwrap();

    let cat = db.create_category(first, "Mine").unwrap();
    db.record_expense(first, cat, 40.0).unwrap();

    assert!(db.list_active_categories(second).unwrap().is_empty());
    let (start, end) = time_window(PeriodKind::Month, Utc::now());
    assert_eq!(db.sum_for_period(second, start, end).unwrap(), 0.0);
}
