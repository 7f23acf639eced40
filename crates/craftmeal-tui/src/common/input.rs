/// Single-line text input used by the auth and admin forms
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Paragraph, Widget},
};

#[derive(Debug, Clone)]
pub struct InputBox {
    /// Current value of the input box
    input: String,
    /// Cursor position, counted in characters not bytes
    character_index: usize,
    label: String,
    /// Render '*' instead of the value (passwords)
    masked: bool,
    /// Validation error shown under the field, if any
    error: Option<String>,
}

impl InputBox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            input: String::new(),
            character_index: 0,
            label: label.into(),
            masked: false,
            error: None,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input = value.into();
        self.character_index = self.input.chars().count();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.character_index = 0;
        self.error = None;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn move_cursor_left(&mut self) {
        let moved = self.character_index.saturating_sub(1);
        self.character_index = self.clamp_cursor(moved);
    }

    pub fn move_cursor_right(&mut self) {
        let moved = self.character_index.saturating_add(1);
        self.character_index = self.clamp_cursor(moved);
    }

    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.input.insert(index, new_char);
        self.move_cursor_right();
        // Typing invalidates the previous validation verdict
        self.error = None;
    }

    /// Byte index for the character the cursor sits on. Characters can be
    /// multi-byte, so the cursor index cannot be used directly.
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.character_index)
            .unwrap_or(self.input.len())
    }

    pub fn delete_char(&mut self) {
        if self.character_index == 0 {
            return;
        }
        // String::remove works on bytes; rebuild from chars instead to stay
        // on char boundaries
        let before = self.input.chars().take(self.character_index - 1);
        let after = self.input.chars().skip(self.character_index);
        self.input = before.chain(after).collect();
        self.move_cursor_left();
        self.error = None;
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input.chars().count())
    }

    fn display_value(&self) -> String {
        if self.masked {
            "*".repeat(self.input.chars().count())
        } else {
            self.input.clone()
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let border_style = if self.error.is_some() {
            Style::default().fg(Color::Red)
        } else if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = match &self.error {
            Some(e) => format!(" {} - {} ", self.label, e),
            None => format!(" {} ", self.label),
        };

        let mut value = self.display_value();
        if focused {
            // Poor man's cursor: mark the insertion point
            let byte = self.byte_index();
            value.insert(byte, '_');
        }

        let style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Paragraph::new(value)
            .style(style)
            .block(Block::bordered().title(title).border_style(border_style))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_deleting() {
        let mut input = InputBox::new("Username");
        for c in "jdoe".chars() {
            input.enter_char(c);
        }
        assert_eq!(input.value(), "jdoe");

        input.delete_char();
        assert_eq!(input.value(), "jdo");
    }

    #[test]
    fn test_cursor_insertion_mid_string() {
        let mut input = InputBox::new("Name");
        input.set_value("jde");
        input.move_cursor_left();
        input.enter_char('o');
        assert_eq!(input.value(), "jdoe");
    }

    #[test]
    fn test_multibyte_safe_editing() {
        let mut input = InputBox::new("Name");
        input.set_value("héllo");
        input.move_cursor_left();
        input.delete_char();
        assert_eq!(input.value(), "hélo");
    }

    #[test]
    fn test_typing_clears_error() {
        let mut input = InputBox::new("Email");
        input.set_error(Some("Invalid email address".to_string()));
        assert!(input.error().is_some());
        input.enter_char('a');
        assert!(input.error().is_none());
    }

    #[test]
    fn test_masked_display() {
        let mut input = InputBox::new("Password").masked();
        input.set_value("Hunter22");
        assert_eq!(input.display_value(), "********");
    }
}
