//! Terminal rendition of the note display surface.

use quicknote_core::{DisplaySurface, NoteRow, Notice, NoticeLevel, UiEvent};
use std::io::Write;

/// Prints rows as they are rendered and keeps them for row lookups.
pub struct TerminalSurface<W: Write> {
    out: W,
    input: String,
    rows: Vec<NoteRow>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            input: String::new(),
            rows: Vec::new(),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Container activation for the 1-based row `position`.
    ///
    /// Positions outside the rendered rows activate nothing.
    pub fn delete_event(&self, position: Option<usize>) -> UiEvent {
        let row = position
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.rows.get(index));
        match row {
            Some(row) => UiEvent::delete(row.id),
            None => UiEvent::ContainerActivated { target: None },
        }
    }

    pub fn print(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
        let _ = writeln!(self.out, "--- notes ---");
    }

    fn append_row(&mut self, row: &NoteRow) {
        self.rows.push(row.clone());
        let _ = writeln!(self.out, "{:>3}. {}  [delete]", self.rows.len(), row.text);
        let _ = self.out.flush();
    }

    fn show_notice(&mut self, notice: &Notice) {
        let label = match notice.level {
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        let _ = writeln!(self.out, "[{label}] {}", notice.message);
        let _ = self.out.flush();
    }
}
