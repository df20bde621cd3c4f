use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::buffer::TextBuffer;

/// A change applied to the typed text by one key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    Inserted(char),
    Deleted,
}

/// The raw typed text. Editing only happens at the end, the way a typist works.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    text: String,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Applies an editing key. Returns `None` for keys that are not edits or that
    /// left the text unchanged.
    pub fn handle(&mut self, key: KeyEvent) -> Option<Edit> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => Some(self.push('\n')),
            KeyCode::Tab => Some(self.push('\t')),
            KeyCode::Backspace => self.text.pop().map(|_| Edit::Deleted),
            KeyCode::Char('u') if ctrl => {
                if self.text.is_empty() {
                    return None;
                }
                self.clear_line();
                Some(Edit::Deleted)
            }
            KeyCode::Char('w') if ctrl => self.delete_word_back().then_some(Edit::Deleted),
            KeyCode::Char(ch) if !ctrl => Some(self.push(ch)),
            _ => None,
        }
    }

    fn push(&mut self, ch: char) -> Edit {
        self.text.push(ch);
        Edit::Inserted(ch)
    }

    /// Removes everything after the last newline.
    fn clear_line(&mut self) {
        let start = self.text.rfind('\n').map(|i| i + 1).unwrap_or(0);
        self.text.truncate(start);
    }

    /// Delete word before the end (unix-word-rubout: skip whitespace, then non-whitespace).
    fn delete_word_back(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        let trimmed = self.text.trim_end_matches(char::is_whitespace);
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map(|(i, ch)| i + ch.len_utf8())
            .unwrap_or(0);
        self.text.truncate(start);
        true
    }
}

impl TextBuffer for LineInput {
    fn value(&self) -> &str {
        &self.text
    }

    fn insert_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn clear(&mut self) {
        self.text.clear();
    }
}
