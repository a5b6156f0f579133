//! CLI command tests

use tally_core::ChatProfile;

use crate::commands;

/// Temp directory holding a database the commands can open by path
fn test_db_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn test_open_db_creates_parent_dirs() {
    let dir = test_db_dir();
    let path = dir.path().join("nested").join("tally.db");

    let db = commands::open_db(Some(&path), true).unwrap();
    assert!(path.exists());
    assert_eq!(db.path(), path.to_str().unwrap());
}

#[test]
fn test_cmd_init_and_sweep() {
    let dir = test_db_dir();
    let path = dir.path().join("tally.db");

    commands::cmd_init(Some(&path), true).unwrap();
    // Sweeping an empty database purges nothing and succeeds
    commands::cmd_sweep(Some(&path), true, None).unwrap();
    commands::cmd_sweep(Some(&path), true, Some(7)).unwrap();
}

#[test]
fn test_cmd_categories_requires_known_user() {
    let dir = test_db_dir();
    let path = dir.path().join("tally.db");
    commands::cmd_init(Some(&path), true).unwrap();

    let result = commands::cmd_categories(Some(&path), true, 12345);
    assert!(result.is_err());
}

#[test]
fn test_cmd_categories_lists_active() {
    let dir = test_db_dir();
    let path = dir.path().join("tally.db");

    let db = commands::open_db(Some(&path), true).unwrap();
    let user_id = db.upsert_user(77, &ChatProfile::default()).unwrap();
    db.create_category(user_id, "Groceries").unwrap();
    drop(db);

    commands::cmd_categories(Some(&path), true, 77).unwrap();
}

#[test]
fn test_cmd_stats_rejects_unknown_period() {
    let dir = test_db_dir();
    let path = dir.path().join("tally.db");

    let db = commands::open_db(Some(&path), true).unwrap();
    db.upsert_user(77, &ChatProfile::default()).unwrap();
    drop(db);

    let result = commands::cmd_stats(Some(&path), true, 77, "year", false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_stats_outputs_for_both_views() {
    let dir = test_db_dir();
    let path = dir.path().join("tally.db");

    let db = commands::open_db(Some(&path), true).unwrap();
    let user_id = db.upsert_user(77, &ChatProfile::default()).unwrap();
    let cat = db.create_category(user_id, "Food").unwrap();
    db.record_expense(user_id, cat, 42.0).unwrap();
    drop(db);

    commands::cmd_stats(Some(&path), true, 77, "week", false).unwrap();
    commands::cmd_stats(Some(&path), true, 77, "month", true).unwrap();
}
