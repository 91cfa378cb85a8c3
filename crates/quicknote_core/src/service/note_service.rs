//! Note use-case service.
//!
//! # Responsibility
//! - Provide list/add/delete APIs over an injected `NoteStore`.
//! - Apply the corrupt-data recovery policy in one place.
//!
//! # Invariants
//! - Every operation starts from a fresh `load`; nothing is cached.
//! - `save` runs only after the complete new list has been computed.
//! - Blank input never reaches the store.
//! - A corrupt persisted value is replaced by an empty list and reported via
//!   `NotesSnapshot::recovered`; backend failures are returned as errors.

use crate::model::note::{Note, NoteId, NoteList};
use crate::store::{CorruptDataError, NoteStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// List state observed (and possibly written) by one operation.
#[derive(Debug)]
pub struct NotesSnapshot {
    /// Notes as persisted at the end of the operation.
    pub notes: NoteList,
    /// Set when the stored value was unreadable and an empty list was used.
    pub recovered: Option<CorruptDataError>,
}

#[derive(Debug)]
pub enum AddOutcome {
    /// The note was appended and the list saved.
    Added { note: Note, snapshot: NotesSnapshot },
    /// Input was empty after trimming; storage was not touched.
    Rejected,
}

#[derive(Debug)]
pub enum DeleteOutcome {
    /// The note was removed and the list saved.
    Deleted { note: Note, snapshot: NotesSnapshot },
    /// Nothing matched; the unchanged list was re-saved.
    NotFound { snapshot: NotesSnapshot },
}

impl DeleteOutcome {
    pub fn snapshot(&self) -> &NotesSnapshot {
        match self {
            Self::Deleted { snapshot, .. } | Self::NotFound { snapshot } => snapshot,
        }
    }
}

/// Note service facade over store implementations.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the stored list without recovery; corrupt data is an error.
    pub fn list_notes(&self) -> Result<NoteList, NoteServiceError> {
        Ok(self.store.load()?)
    }

    /// Loads the stored list, degrading corrupt data to an empty list.
    pub fn load_or_recover(&self) -> Result<NotesSnapshot, NoteServiceError> {
        match self.store.load() {
            Ok(notes) => Ok(NotesSnapshot {
                notes,
                recovered: None,
            }),
            Err(StoreError::CorruptData(err)) => {
                warn!(
                    "event=notes_recover module=service status=degraded error_code=corrupt_data key={}",
                    err.key()
                );
                Ok(NotesSnapshot {
                    notes: NoteList::new(),
                    recovered: Some(err),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Appends trimmed `raw` input as a new note.
    pub fn add_note(&self, raw: &str) -> Result<AddOutcome, NoteServiceError> {
        let Some(note) = Note::from_input(raw) else {
            info!("event=note_add module=service status=rejected reason=blank_input");
            return Ok(AddOutcome::Rejected);
        };

        let mut snapshot = self.load_or_recover()?;
        snapshot.notes.push(note.clone());
        self.store.save(&snapshot.notes)?;
        info!(
            "event=note_add module=service status=ok note_id={} count={}",
            note.id,
            snapshot.notes.len()
        );
        Ok(AddOutcome::Added { note, snapshot })
    }

    /// Removes the note identified by `id`.
    pub fn delete_note(&self, id: NoteId) -> Result<DeleteOutcome, NoteServiceError> {
        self.delete_where(|notes| notes.remove_by_id(id))
    }

    /// Removes the first note whose text equals `text` exactly.
    pub fn delete_note_by_text(&self, text: &str) -> Result<DeleteOutcome, NoteServiceError> {
        self.delete_where(|notes| notes.remove_first_text(text))
    }

    fn delete_where(
        &self,
        remove: impl FnOnce(&mut NoteList) -> Option<Note>,
    ) -> Result<DeleteOutcome, NoteServiceError> {
        let mut snapshot = self.load_or_recover()?;
        let removed = remove(&mut snapshot.notes);
        self.store.save(&snapshot.notes)?;

        match removed {
            Some(note) => {
                info!(
                    "event=note_delete module=service status=ok note_id={} count={}",
                    note.id,
                    snapshot.notes.len()
                );
                Ok(DeleteOutcome::Deleted { note, snapshot })
            }
            None => {
                info!(
                    "event=note_delete module=service status=not_found count={}",
                    snapshot.notes.len()
                );
                Ok(DeleteOutcome::NotFound { snapshot })
            }
        }
    }
}
