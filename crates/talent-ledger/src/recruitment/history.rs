/// Recall buffer for previously entered command lines.
///
/// The cursor ranges over `0..=len`; `len` is the empty tail slot the cursor
/// returns to after each new entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, command: impl Into<String>) {
        self.entries.push(command.into());
        self.reset();
    }

    pub fn reset(&mut self) {
        self.cursor = self.entries.len();
    }

    /// Steps back one entry, stopping at the oldest.
    pub fn back(&mut self) -> Option<&str> {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    /// Steps forward one entry, stopping at the tail.
    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Entry under the cursor; `None` at the tail.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Recorded lines, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
