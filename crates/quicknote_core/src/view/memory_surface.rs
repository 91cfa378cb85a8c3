use super::surface::{DisplaySurface, Notice, NoteRow, UiEvent};

/// Headless surface that keeps rendered state in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    input: String,
    rows: Vec<NoteRow>,
    notices: Vec<Notice>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user typing into the input control.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn rows(&self) -> &[NoteRow] {
        &self.rows
    }

    pub fn row_texts(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.text.as_str()).collect()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Activation event for the delete control of the row at `index`.
    pub fn delete_event(&self, index: usize) -> Option<UiEvent> {
        self.rows.get(index).map(|row| UiEvent::delete(row.id))
    }
}

impl DisplaySurface for MemorySurface {
    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn append_row(&mut self, row: &NoteRow) {
        self.rows.push(row.clone());
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
