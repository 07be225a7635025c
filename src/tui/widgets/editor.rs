/// Minimal text editor state for form fields. Single-line by default;
/// multi-line fields accept Enter as a newline.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    content: String,
    /// Cursor position as a char offset into `content`
    cursor: usize,
    multiline: bool,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn with_content(content: &str) -> Self {
        Self {
            cursor: content.chars().count(),
            content: content.to_string(),
            multiline: false,
        }
    }

    pub fn multiline_with_content(content: &str) -> Self {
        Self {
            cursor: content.chars().count(),
            content: content.to_string(),
            multiline: true,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.content.insert(offset, c);
        self.cursor += 1;
    }

    /// Enter inserts a newline only in multi-line fields
    pub fn insert_newline(&mut self) {
        if self.multiline {
            self.insert_char('\n');
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.content.remove(offset);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_at_cursor() {
        let mut e = Editor::new();
        for c in "abc".chars() {
            e.insert_char(c);
        }
        e.move_left();
        e.insert_char('x');
        assert_eq!(e.content(), "abxc");
        e.backspace();
        assert_eq!(e.content(), "abc");
        assert_eq!(e.cursor(), 2);
    }

    #[test]
    fn newline_only_in_multiline() {
        let mut single = Editor::new();
        single.insert_newline();
        assert_eq!(single.content(), "");

        let mut multi = Editor::multiline();
        multi.insert_char('a');
        multi.insert_newline();
        multi.insert_char('b');
        assert_eq!(multi.content(), "a\nb");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut e = Editor::with_content("héllo");
        e.move_end();
        e.backspace();
        assert_eq!(e.content(), "héll");
        e.move_home();
        e.move_right();
        e.backspace();
        assert_eq!(e.content(), "éll");
    }
}
