/// Single-line input with a byte cursor kept on char boundaries.
#[derive(Debug, Clone, Default)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.drain(idx..self.cursor);
            self.cursor = idx;
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            let end = self.cursor + ch.len_utf8();
            self.text.drain(self.cursor..end);
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Number of characters before the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputLine {
        let mut line = InputLine::new();
        text.chars().for_each(|ch| line.insert_char(ch));
        line
    }

    #[test]
    fn typing_advances_the_cursor() {
        let line = typed("hello");

        assert_eq!(line.as_str(), "hello");
        assert_eq!(line.cursor_column(), 5);
    }

    #[test]
    fn edits_respect_multibyte_chars() {
        let mut line = typed("café");
        line.backspace();
        assert_eq!(line.as_str(), "caf");

        line.move_home();
        line.move_right();
        line.insert_char('h');
        line.insert_char('\n');
        assert_eq!(line.as_str(), "chaf");
        assert_eq!(line.cursor_column(), 2);

        line.delete_char();
        line.move_end();
        line.move_left();
        assert_eq!(line.as_str(), "chf");
        assert_eq!(line.cursor_column(), 2);
    }
}
