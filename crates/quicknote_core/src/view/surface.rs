//! Display surface contract.
//!
//! The surface is an external collaborator: it owns the text input, the row
//! container and a notice area, and reports user activity as `UiEvent`s.

use crate::model::note::{Note, NoteId};

/// One rendered row: note text plus its delete control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: NoteId,
    pub text: String,
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            text: note.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// User-visible message shown outside the row container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Child control inside the row container that received an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowControl {
    /// The row's delete control.
    Delete(NoteId),
    /// The row's text span.
    Text(NoteId),
}

/// User trigger reported by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The surface finished loading and can be rendered into.
    Ready,
    /// The add control was activated.
    AddTriggered,
    /// Something inside the row container was activated; `target` is `None`
    /// when the activation did not land on a known control.
    ContainerActivated { target: Option<RowControl> },
}

impl UiEvent {
    /// Container activation on the delete control of `id`.
    pub fn delete(id: NoteId) -> Self {
        Self::ContainerActivated {
            target: Some(RowControl::Delete(id)),
        }
    }
}

pub trait DisplaySurface {
    /// Current contents of the text input.
    fn input_text(&self) -> String;
    fn clear_input(&mut self);
    /// Removes every rendered note row.
    fn clear_rows(&mut self);
    /// Appends one row after the existing rows.
    fn append_row(&mut self, row: &NoteRow);
    fn show_notice(&mut self, notice: &Notice);
}
