//! Note and note-list model.
//!
//! # Responsibility
//! - Define the single unit of data (`Note`) and its ordered container.
//! - Own input normalization for new note text.
//!
//! # Invariants
//! - `NoteId` is stable and never reused for another note.
//! - `Note::text` is never empty or surrounded by whitespace when created via
//!   `Note::from_input`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user-entered note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
}

impl Note {
    /// Creates a note with a generated id. Text is stored as given.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(NoteId::new(), text)
    }

    pub fn with_id(id: NoteId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Builds a note from raw user input.
    ///
    /// Returns `None` when the input is empty after trimming.
    pub fn from_input(raw: &str) -> Option<Self> {
        normalize_note_text(raw).map(Self::new)
    }
}

/// Trims surrounding whitespace; `None` means the input is rejected.
pub fn normalize_note_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Ordered sequence of notes in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteList(Vec<Note>);

impl NoteList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a list from plain texts, assigning a fresh id to each.
    pub fn from_texts<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(texts.into_iter().map(Note::new).collect())
    }

    pub fn push(&mut self, note: Note) {
        self.0.push(note);
    }

    /// Removes the note with `id`, if present.
    pub fn remove_by_id(&mut self, id: NoteId) -> Option<Note> {
        let index = self.0.iter().position(|note| note.id == id)?;
        Some(self.0.remove(index))
    }

    /// Removes the first note whose text equals `text` exactly.
    pub fn remove_first_text(&mut self, text: &str) -> Option<Note> {
        let index = self.0.iter().position(|note| note.text == text)?;
        Some(self.0.remove(index))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.0.iter().map(|note| note.text.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.0
    }
}

impl From<Vec<Note>> for NoteList {
    fn from(value: Vec<Note>) -> Self {
        Self(value)
    }
}

impl IntoIterator for NoteList {
    type Item = Note;
    type IntoIter = std::vec::IntoIter<Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NoteList {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_note_text, Note, NoteList};

    #[test]
    fn normalize_trims_and_rejects_blank() {
        assert_eq!(normalize_note_text("  hello  ").as_deref(), Some("hello"));
        assert_eq!(normalize_note_text(" \t\n "), None);
        assert_eq!(normalize_note_text(""), None);
    }

    #[test]
    fn remove_by_id_only_touches_matching_duplicate() {
        let first = Note::new("dup");
        let second = Note::new("dup");
        let mut list = NoteList::from(vec![first.clone(), second.clone()]);

        let removed = list.remove_by_id(second.id).expect("second dup should be removed");
        assert_eq!(removed.id, second.id);
        assert_eq!(list.as_slice(), &[first]);
    }

    #[test]
    fn remove_first_text_removes_single_entry() {
        let mut list = NoteList::from_texts(["x", "dup", "dup"]);
        assert!(list.remove_first_text("dup").is_some());
        assert_eq!(list.texts(), vec!["x", "dup"]);
        assert!(list.remove_first_text("missing").is_none());
        assert_eq!(list.len(), 2);
    }
}
