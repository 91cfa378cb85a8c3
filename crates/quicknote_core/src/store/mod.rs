//! Whole-list note persistence.
//!
//! # Responsibility
//! - Define the `NoteStore` contract consumed by services and controllers.
//! - Map store failures to semantic errors (`CorruptData`) in addition to
//!   backend transport errors.
//!
//! # Invariants
//! - `load` and `save` always move the complete list; no partial updates.
//! - An absent or blank persisted value loads as an empty list.

use crate::kv::KvError;
use crate::model::note::NoteList;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod json_store;

pub use json_store::{JsonNoteStore, NOTES_STORAGE_KEY};

pub type StoreResult<T> = Result<T, StoreError>;

/// Why a persisted value could not be read as a note list.
#[derive(Debug)]
pub enum CorruptCause {
    /// The backend holds something other than UTF-8 text.
    NotText(&'static str),
    /// The text is not a JSON array of notes.
    Json(serde_json::Error),
}

/// The persisted value exists but is not a valid note list.
///
/// `Display` names the key and the failure category only; stored content is
/// never echoed.
#[derive(Debug)]
pub struct CorruptDataError {
    key: String,
    cause: CorruptCause,
}

impl CorruptDataError {
    pub fn not_text(key: impl Into<String>, reason: &'static str) -> Self {
        Self {
            key: key.into(),
            cause: CorruptCause::NotText(reason),
        }
    }

    pub fn json(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            key: key.into(),
            cause: CorruptCause::Json(source),
        }
    }

    /// Storage key holding the unreadable value.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cause(&self) -> &CorruptCause {
        &self.cause
    }
}

/// Content-free label for a JSON decode failure.
pub(crate) fn json_category(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        serde_json::error::Category::Io => "io",
        serde_json::error::Category::Syntax => "syntax",
        serde_json::error::Category::Data => "shape",
        serde_json::error::Category::Eof => "truncated",
    }
}

impl Display for CorruptDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "stored value under `{}` is not a valid note list: ", self.key)?;
        match &self.cause {
            CorruptCause::NotText(reason) => write!(f, "{reason}"),
            CorruptCause::Json(err) => write!(
                f,
                "{} error at line {} column {}",
                json_category(err),
                err.line(),
                err.column()
            ),
        }
    }
}

impl Error for CorruptDataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            CorruptCause::NotText(_) => None,
            CorruptCause::Json(err) => Some(err),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    CorruptData(CorruptDataError),
    Encode(serde_json::Error),
    Kv(KvError),
}

impl StoreError {
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, Self::CorruptData(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorruptData(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode note list: {err}"),
            Self::Kv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CorruptData(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Kv(err) => Some(err),
        }
    }
}

impl From<CorruptDataError> for StoreError {
    fn from(value: CorruptDataError) -> Self {
        Self::CorruptData(value)
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Persistence interface for the note list.
pub trait NoteStore {
    /// Reads the full note list.
    fn load(&self) -> StoreResult<NoteList>;
    /// Replaces the persisted list with `notes`.
    fn save(&self, notes: &NoteList) -> StoreResult<()>;
}
