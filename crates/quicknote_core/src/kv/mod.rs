//! Persistent key-value storage contracts.
//!
//! # Responsibility
//! - Model the host key-value store notes are persisted into.
//! - Keep backend details (SQLite, in-process map) behind one trait.
//!
//! # Invariants
//! - `set_item` overwrites any previous value for the key.
//! - A missing key reads as `None`, never as an error.
//! - A stored value that is not valid text is reported as
//!   `KvError::InvalidValue`, separate from transport failures.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

/// Backend failure while reading or writing one key.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    /// The entry exists but does not hold UTF-8 text.
    InvalidValue { key: String, reason: &'static str },
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "key-value storage table `{table}` is missing")
            }
            Self::InvalidValue { key, reason } => {
                write!(f, "value stored under `{key}` is not text: {reason}")
            }
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::InvalidValue { .. } => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get_item(&self, key: &str) -> KvResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> KvResult<()>;
    /// Deletes `key`. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> KvResult<()>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for &K {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        (**self).remove_item(key)
    }
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        (**self).remove_item(key)
    }
}
