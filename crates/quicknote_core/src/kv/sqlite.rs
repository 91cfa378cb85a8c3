//! SQLite-backed key-value store.
//!
//! # Invariants
//! - All entries live in the `kv_entries` table created by migration 1.
//! - Each call touches exactly one row.

use super::{KeyValueStore, KvError, KvResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const KV_TABLE: &str = "kv_entries";

pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps a migrated connection, rejecting ones without `kv_entries`.
    pub fn try_new(conn: Connection) -> KvResult<Self> {
        if !table_exists(&conn, KV_TABLE)? {
            return Err(KvError::MissingRequiredTable(KV_TABLE));
        }
        Ok(Self { conn })
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        Self::try_new(open_db(path)?)
    }

    pub fn open_in_memory() -> KvResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        let stored = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| {
                    Ok(match row.get_ref(0)? {
                        ValueRef::Null => None,
                        ValueRef::Text(bytes) => Some(
                            std::str::from_utf8(bytes)
                                .map(str::to_string)
                                .map_err(|_| "invalid UTF-8 text"),
                        ),
                        ValueRef::Blob(_) => Some(Err("blob value")),
                        ValueRef::Integer(_) | ValueRef::Real(_) => Some(Err("numeric value")),
                    })
                },
            )
            .optional()?
            .flatten();

        match stored {
            None => Ok(None),
            Some(Ok(text)) => Ok(Some(text)),
            Some(Err(reason)) => Err(KvError::InvalidValue {
                key: key.to_string(),
                reason,
            }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> KvResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
