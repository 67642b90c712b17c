//! New-task form: title and description buffers.

use taskboard_core::{TaskId, TaskStore};

/// Single-line text buffer with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    /// Cursor position in characters (not bytes).
    cursor: usize,
}

impl TextInput {
    /// Current contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the character at `char_idx`, or the end of the text.
    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.text.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    /// Move cursor left.
    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start.
    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor past the last character.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Empty the buffer and return what it held.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

/// Which form field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Task title.
    Title,
    /// Task description.
    Description,
}

/// The add-task form.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    /// Title buffer.
    pub title: TextInput,
    /// Description buffer.
    pub description: TextInput,
}

impl TaskForm {
    /// Buffer for the given field.
    #[must_use]
    pub const fn field(&self, field: Field) -> &TextInput {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
        }
    }

    /// Mutable buffer for the given field.
    pub const fn field_mut(&mut self, field: Field) -> &mut TextInput {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
        }
    }

    /// Adds a task from the two buffers, then clears them.
    ///
    /// Empty fields are submitted as-is.
    pub fn submit(&mut self, store: &mut TaskStore) -> TaskId {
        let title = self.title.take();
        let description = self.description.take();
        store.add_task(title, description)
    }
}
