//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rusqlite::params;

    fn test_user(db: &Database) -> i64 {
        db.upsert_user(1001, &ChatProfile::default()).unwrap()
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);
        assert!(db.list_active_categories(user_id).unwrap().is_empty());
    }

    #[test]
    fn test_user_upsert_is_stable() {
        let db = Database::in_memory().unwrap();

        let profile = ChatProfile {
            username: Some("ada".into()),
            first_name: Some("Ada".into()),
            last_name: None,
        };
        let id = db.upsert_user(42, &profile).unwrap();
        assert!(id > 0);

        // Upsert with refreshed profile keeps the same internal id
        let refreshed = ChatProfile {
            username: Some("ada_l".into()),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
        };
        let id2 = db.upsert_user(42, &refreshed).unwrap();
        assert_eq!(id, id2);

        let user = db.get_user(id).unwrap().unwrap();
        assert_eq!(user.chat_id, 42);
        assert_eq!(user.username.as_deref(), Some("ada_l"));
        assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn test_find_user_by_chat_id() {
        let db = Database::in_memory().unwrap();
        assert!(db.find_user_by_chat_id(7).unwrap().is_none());

        let id = db.upsert_user(7, &ChatProfile::default()).unwrap();
        assert_eq!(db.find_user_by_chat_id(7).unwrap(), Some(id));
    }

    #[test]
    fn test_category_crud() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let groceries = db.create_category(user_id, "Groceries").unwrap();
        let transport = db.create_category(user_id, "  Transport ").unwrap();

        // Creation order is preserved, names are trimmed
        let active = db.list_active_categories(user_id).unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0], CategoryRef { id: groceries, name: "Groceries".into() });
        assert_eq!(active[1], CategoryRef { id: transport, name: "Transport".into() });

        assert_eq!(db.category_name(groceries).unwrap().as_deref(), Some("Groceries"));
        assert!(db.category_name(9999).unwrap().is_none());

        db.rename_category(groceries, "Food").unwrap();
        assert_eq!(db.category_name(groceries).unwrap().as_deref(), Some("Food"));
        assert!(matches!(
            db.rename_category(9999, "Nope"),
            Err(crate::Error::NotFound(_))
        ));
    }

    #[test]
    fn test_invalid_category_names_do_not_write() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        assert!(db.create_category(user_id, "   ").is_err());
        assert!(db.create_category(user_id, &"x".repeat(65)).is_err());
        assert!(db.list_active_categories(user_id).unwrap().is_empty());

        // Rename applies the same rule
        let id = db.create_category(user_id, "Books").unwrap();
        assert!(db.rename_category(id, "").is_err());
        assert_eq!(db.category_name(id).unwrap().as_deref(), Some("Books"));
    }

    #[test]
    fn test_soft_delete_hides_category_immediately() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let id = db.create_category(user_id, "Cafes").unwrap();
        db.record_expense(user_id, id, 12.5).unwrap();

        db.soft_delete_category(id).unwrap();
        assert!(db.list_active_categories(user_id).unwrap().is_empty());

        // The row and its expenses survive for history
        let cat = db.get_category(id).unwrap().unwrap();
        assert!(cat.is_deleted);
        assert!(cat.deleted_at.is_some());
        let conn = db.conn().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM expenses WHERE category_id = ?",
                params![id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);

        assert!(matches!(
            db.soft_delete_category(9999),
            Err(crate::Error::NotFound(_))
        ));
    }

    #[test]
    fn test_record_expense_rejects_bad_amounts() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);
        let cat = db.create_category(user_id, "Misc").unwrap();

        assert!(db.record_expense(user_id, cat, 0.0).is_err());
        assert!(db.record_expense(user_id, cat, -5.0).is_err());
        assert!(db.record_expense(user_id, cat, f64::NAN).is_err());

        let conn = db.conn().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_sum_for_period_is_half_open() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);
        let cat = db.create_category(user_id, "Rent").unwrap();

        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        db.record_expense_at(user_id, cat, 100.0, start).unwrap();
        db.record_expense_at(user_id, cat, 10.0, end - Duration::seconds(1)).unwrap();
        db.record_expense_at(user_id, cat, 1000.0, end).unwrap();
        db.record_expense_at(user_id, cat, 1000.0, start - Duration::seconds(1)).unwrap();

        assert_eq!(db.sum_for_period(user_id, start, end).unwrap(), 110.0);
    }

    #[test]
    fn test_sum_for_period_ignores_deletion_status() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);
        let cat = db.create_category(user_id, "Gone").unwrap();

        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        db.record_expense_at(user_id, cat, 55.0, start + Duration::days(3)).unwrap();

        db.soft_delete_category(cat).unwrap();
        assert_eq!(db.sum_for_period(user_id, start, end).unwrap(), 55.0);
    }

    #[test]
    fn test_spending_by_category_flags_deleted_and_orders_desc() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let when = start + Duration::days(1);

        let food = db.create_category(user_id, "Food").unwrap();
        let old = db.create_category(user_id, "Old").unwrap();
        db.record_expense_at(user_id, food, 30.0, when).unwrap();
        db.record_expense_at(user_id, food, 20.0, when).unwrap();
        db.record_expense_at(user_id, old, 80.0, when).unwrap();
        db.soft_delete_category(old).unwrap();

        let rows = db.spending_by_category(user_id, start, end).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Old");
        assert_eq!(rows[0].amount, 80.0);
        assert!(rows[0].is_deleted);
        assert_eq!(rows[1].name, "Food");
        assert_eq!(rows[1].amount, 50.0);
        assert!(!rows[1].is_deleted);
    }

    #[test]
    fn test_spending_by_category_splits_on_deleted_flag() {
        // A deleted "Cafes" and a recreated active "Cafes" stay separate rows
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let when = start + Duration::days(1);

        let first = db.create_category(user_id, "Cafes").unwrap();
        db.record_expense_at(user_id, first, 40.0, when).unwrap();
        db.soft_delete_category(first).unwrap();

        let second = db.create_category(user_id, "Cafes").unwrap();
        db.record_expense_at(user_id, second, 15.0, when).unwrap();

        let rows = db.spending_by_category(user_id, start, end).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.is_deleted && r.amount == 40.0));
        assert!(rows.iter().any(|r| !r.is_deleted && r.amount == 15.0));
    }

    #[test]
    fn test_top_spending_ranks_and_folds_other() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let when = start + Duration::days(1);

        for (name, amount) in [("A", 50.0), ("B", 40.0), ("C", 30.0), ("D", 20.0), ("E", 10.0)] {
            let id = db.create_category(user_id, name).unwrap();
            db.record_expense_at(user_id, id, amount, when).unwrap();
        }

        let top = db.top_spending(user_id, start, end, 3).unwrap();
        let amounts: Vec<f64> = top.top.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![50.0, 40.0, 30.0]);
        assert_eq!(top.other_sum, 30.0);
    }

    #[test]
    fn test_top_spending_under_n_has_no_other() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let when = start + Duration::days(1);

        for (name, amount) in [("A", 50.0), ("B", 40.0)] {
            let id = db.create_category(user_id, name).unwrap();
            db.record_expense_at(user_id, id, amount, when).unwrap();
        }

        let top = db.top_spending(user_id, start, end, 3).unwrap();
        assert_eq!(top.top.len(), 2);
        assert_eq!(top.other_sum, 0.0);
    }

    #[test]
    fn test_top_spending_excludes_deleted_categories() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let when = start + Duration::days(1);

        let big = db.create_category(user_id, "Big").unwrap();
        db.record_expense_at(user_id, big, 500.0, when).unwrap();
        db.soft_delete_category(big).unwrap();

        let small = db.create_category(user_id, "Small").unwrap();
        db.record_expense_at(user_id, small, 5.0, when).unwrap();

        let top = db.top_spending(user_id, start, end, 3).unwrap();
        assert_eq!(top.top.len(), 1);
        assert_eq!(top.top[0].name, "Small");
        assert_eq!(top.other_sum, 0.0);
    }

    /// Backdate a category's deleted_at stamp by `days`
    fn backdate_deletion(db: &Database, category_id: i64, days: i64) {
        let stamp = format_datetime(chrono::Utc::now() - Duration::days(days));
        let conn = db.conn().unwrap();
        conn.execute(
            "UPDATE categories SET deleted_at = ? WHERE id = ?",
            params![stamp, category_id],
        )
        .unwrap();
    }

    #[test]
    fn test_purge_respects_retention_window() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let fresh = db.create_category(user_id, "Fresh").unwrap();
        db.record_expense(user_id, fresh, 10.0).unwrap();
        db.soft_delete_category(fresh).unwrap();
        backdate_deletion(&db, fresh, 29);

        let stale = db.create_category(user_id, "Stale").unwrap();
        db.record_expense(user_id, stale, 20.0).unwrap();
        db.record_expense(user_id, stale, 30.0).unwrap();
        db.soft_delete_category(stale).unwrap();
        backdate_deletion(&db, stale, 31);

        let result = db.purge_deleted_categories(30).unwrap();
        assert_eq!(result.categories_deleted, 1);
        assert_eq!(result.expenses_deleted, 2);

        // 29 days old survives with its expense; 31 days old is gone
        assert!(db.get_category(fresh).unwrap().is_some());
        assert!(db.get_category(stale).unwrap().is_none());
        let conn = db.conn().unwrap();
        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 1);
    }

    #[test]
    fn test_purge_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let stale = db.create_category(user_id, "Stale").unwrap();
        db.record_expense(user_id, stale, 5.0).unwrap();
        db.soft_delete_category(stale).unwrap();
        backdate_deletion(&db, stale, 40);

        let first = db.purge_deleted_categories(30).unwrap();
        assert!(!first.is_empty());

        let second = db.purge_deleted_categories(30).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_purge_leaves_active_categories_alone() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let active = db.create_category(user_id, "Active").unwrap();
        db.record_expense(user_id, active, 7.0).unwrap();

        let result = db.purge_deleted_categories(30).unwrap();
        assert!(result.is_empty());
        assert_eq!(db.list_active_categories(user_id).unwrap().len(), 1);
    }
}
