//! Note view-controller.
//!
//! # Responsibility
//! - Render the stored note list onto a `DisplaySurface`.
//! - Handle the three user triggers: initial render, add, delete.
//!
//! # Invariants
//! - Each trigger runs one complete load/modify/save/render cycle.
//! - Rendering always replaces all rows from the list just loaded or saved,
//!   for add and delete alike.
//! - The input is cleared only after a successful add.
//! - Corrupt stored data degrades to an empty list plus a warning notice.

use super::surface::{DisplaySurface, Notice, NoteRow, RowControl, UiEvent};
use crate::model::note::{NoteId, NoteList};
use crate::service::note_service::{
    AddOutcome, DeleteOutcome, NoteService, NoteServiceError, NotesSnapshot,
};
use crate::store::NoteStore;
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CORRUPT_DATA_NOTICE: &str = "Saved notes could not be read and were reset to an empty list.";
const STORAGE_ERROR_NOTICE: &str = "Notes could not be loaded or saved; nothing was changed.";

#[derive(Debug)]
pub enum ControllerError {
    Service(NoteServiceError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
        }
    }
}

impl From<NoteServiceError> for ControllerError {
    fn from(value: NoteServiceError) -> Self {
        Self::Service(value)
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Keeps a display surface synchronized with the stored note list.
pub struct NoteController<S: NoteStore, D: DisplaySurface> {
    service: NoteService<S>,
    surface: D,
}

impl<S: NoteStore, D: DisplaySurface> NoteController<S, D> {
    pub fn new(store: S, surface: D) -> Self {
        Self {
            service: NoteService::new(store),
            surface,
        }
    }

    pub fn service(&self) -> &NoteService<S> {
        &self.service
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    /// Dispatches one surface event.
    ///
    /// Container activations that do not hit a delete control are ignored.
    pub fn handle_event(&mut self, event: UiEvent) -> ControllerResult<()> {
        match event {
            UiEvent::Ready => self.initial_render(),
            UiEvent::AddTriggered => self.add_note().map(|_| ()),
            UiEvent::ContainerActivated {
                target: Some(RowControl::Delete(id)),
            } => self.delete_note(id).map(|_| ()),
            UiEvent::ContainerActivated { .. } => {
                debug!("event=container_activated module=view status=ignored");
                Ok(())
            }
        }
    }

    /// Loads the stored list and renders it, replacing existing rows.
    pub fn initial_render(&mut self) -> ControllerResult<()> {
        let snapshot = self.guard(|service| service.load_or_recover())?;
        self.apply_snapshot(&snapshot);
        Ok(())
    }

    /// Adds the current input as a note.
    ///
    /// Returns `false` when the input was blank and nothing changed.
    pub fn add_note(&mut self) -> ControllerResult<bool> {
        let input = self.surface.input_text();
        match self.guard(|service| service.add_note(&input))? {
            AddOutcome::Rejected => Ok(false),
            AddOutcome::Added { snapshot, .. } => {
                self.apply_snapshot(&snapshot);
                self.surface.clear_input();
                Ok(true)
            }
        }
    }

    /// Deletes the note shown in the row identified by `id`.
    ///
    /// Returns `false` when no stored note had that id.
    pub fn delete_note(&mut self, id: NoteId) -> ControllerResult<bool> {
        let outcome = self.guard(|service| service.delete_note(id))?;
        self.apply_snapshot(outcome.snapshot());
        Ok(matches!(outcome, DeleteOutcome::Deleted { .. }))
    }

    fn guard<T>(
        &mut self,
        op: impl FnOnce(&NoteService<S>) -> Result<T, NoteServiceError>,
    ) -> ControllerResult<T> {
        op(&self.service).map_err(|err| {
            error!("event=view_op module=view status=error error={err}");
            self.surface.show_notice(&Notice::error(STORAGE_ERROR_NOTICE));
            ControllerError::from(err)
        })
    }

    fn apply_snapshot(&mut self, snapshot: &NotesSnapshot) {
        if snapshot.recovered.is_some() {
            self.surface.show_notice(&Notice::warning(CORRUPT_DATA_NOTICE));
        }
        self.render(&snapshot.notes);
    }

    fn render(&mut self, notes: &NoteList) {
        self.surface.clear_rows();
        for note in notes {
            self.surface.append_row(&NoteRow::from(note));
        }
        debug!("event=view_render module=view status=ok rows={}", notes.len());
    }
}
