//! Chat user registration and lookup

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{ChatProfile, User};

impl Database {
    /// Insert or refresh a user keyed by chat identity, returning the
    /// internal id.
    ///
    /// Called on every "start" interaction: profile fields (username, names)
    /// are overwritten with whatever the chat platform currently reports.
    pub fn upsert_user(&self, chat_id: i64, profile: &ChatProfile) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO users (chat_id, username, first_name, last_name)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(chat_id) DO UPDATE
            SET username = excluded.username,
                first_name = excluded.first_name,
                last_name = excluded.last_name
            "#,
            params![chat_id, profile.username, profile.first_name, profile.last_name],
        )?;

        let id: i64 = conn.query_row(
            "SELECT id FROM users WHERE chat_id = ?",
            params![chat_id],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Resolve the internal user id for a chat identity
    ///
    /// `None` means the user never ran /start; handlers treat that as the
    /// global "not found" recovery path.
    pub fn find_user_by_chat_id(&self, chat_id: i64) -> Result<Option<i64>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id FROM users WHERE chat_id = ?",
            params![chat_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(Into::into)
    }

    /// Get a full user record by internal id
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, chat_id, username, first_name, last_name, created_at FROM users WHERE id = ?",
            params![id],
            |row| {
                let created_at_str: String = row.get(5)?;
                Ok(User {
                    id: row.get(0)?,
                    chat_id: row.get(1)?,
                    username: row.get(2)?,
                    first_name: row.get(3)?,
                    last_name: row.get(4)?,
                    created_at: parse_datetime(&created_at_str),
                })
            },
        )
        .optional()
        .map_err(Into::into)
    }
}
