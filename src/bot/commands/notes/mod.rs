pub mod commands;

pub const DEFAULT_NOTE: &str = "To enter the giveaway: request a ticket for channel points";

/// The single broadcast note. Writes replace the whole string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteStore {
    text: String,
}

impl NoteStore {
    pub fn new() -> Self {
        NoteStore { text: DEFAULT_NOTE.to_string() }
    }

    pub fn set_note(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn get_note(&self) -> &str {
        &self.text
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}
