/// The externally owned text the user types into.
///
/// The controller reads a snapshot per event and only writes back through
/// `insert_text` (auto-indentation) and `clear` (restart).
pub trait TextBuffer {
    fn value(&self) -> &str;
    fn insert_text(&mut self, text: &str);
    fn clear(&mut self);
}

impl TextBuffer for String {
    fn value(&self) -> &str {
        self.as_str()
    }

    fn insert_text(&mut self, text: &str) {
        self.push_str(text);
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}
