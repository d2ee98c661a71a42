//! SQLite-backed key/value storage.
//!
//! # Invariants
//! - One row per key; writes replace the whole value.
//! - Connections must come from `db::open_db*` so the table exists.

use super::{StorageBackend, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key/value storage over the `local_storage` table.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` when the `local_storage` table is missing.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let ready: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master
                WHERE type = 'table' AND name = 'local_storage'
            );",
            [],
            |row| row.get(0),
        )?;
        if ready != 1 {
            return Err(StoreError::Unavailable(
                "local_storage table is missing; open the database with open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl StorageBackend for SqliteStorage<'_> {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
