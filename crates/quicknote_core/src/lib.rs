//! Core logic for QuickNote, a single-list note widget.
//! This crate owns persistence and display synchronization; hosts only
//! provide a `DisplaySurface` and forward user events.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use config::{AppConfig, LogConfig};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{normalize_note_text, Note, NoteId, NoteList};
pub use service::note_service::{
    AddOutcome, DeleteOutcome, NoteService, NoteServiceError, NotesSnapshot,
};
pub use store::{
    CorruptCause, CorruptDataError, JsonNoteStore, NoteStore, StoreError, StoreResult, NOTES_STORAGE_KEY,
};
pub use view::controller::{ControllerError, ControllerResult, NoteController};
pub use view::memory_surface::MemorySurface;
pub use view::surface::{DisplaySurface, Notice, NoticeLevel, NoteRow, RowControl, UiEvent};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
