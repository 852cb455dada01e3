//! Text and keypad input buffers.

use calcvault_types::PASSWORD_MAX_LEN;
use unicode_segmentation::UnicodeSegmentation;

/// Single-buffer text editing with grapheme-aware cursor movement.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DraftInput {
    text: String,
    /// Cursor position in graphemes.
    cursor: usize,
}

impl DraftInput {
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut draft = Self::default();
        draft.set_text(text.into());
        draft
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor.saturating_add(1);
        self.cursor = self.clamp_cursor(cursor_moved_right);
    }

    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.text.insert(index, new_char);
        self.move_cursor_right();
    }

    pub fn enter_newline(&mut self) {
        self.enter_char('\n');
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let start = self.byte_index_at(self.cursor - 1);
        let end = self.byte_index_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.move_cursor_left();
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }

        let start = self.byte_index_at(self.cursor);
        let end = self.byte_index_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.cursor = self.grapheme_count();
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Text before the cursor, for caret placement when rendering.
    #[must_use]
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index()]
    }

    #[must_use]
    pub fn byte_index(&self) -> usize {
        self.byte_index_at(self.cursor)
    }

    fn byte_index_at(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.min(self.grapheme_count())
    }
}

/// Digit-only keypad buffer, capped at the maximum password length.
///
/// Debug output never includes the digits.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct PinPad {
    digits: String,
}

impl std::fmt::Debug for PinPad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinPad")
            .field("len", &self.digits.len())
            .finish()
    }
}

impl PinPad {
    /// Returns `false` when the key was not accepted.
    pub fn push(&mut self, key: char) -> bool {
        if !key.is_ascii_digit() || self.is_full() {
            return false;
        }
        self.digits.push(key);
        true
    }

    pub fn pop(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.digits)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.digits.len() >= PASSWORD_MAX_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftInput, PinPad};

    #[test]
    fn draft_input_set_text_moves_cursor_to_end() {
        let mut draft = DraftInput::with_text("initial");
        draft.set_text("new text".to_string());

        assert_eq!(draft.text(), "new text");
        assert_eq!(draft.cursor(), 8);
    }

    #[test]
    fn draft_input_edits_at_cursor() {
        let mut draft = DraftInput::with_text("helo");
        draft.move_cursor_left();
        draft.enter_char('l');
        assert_eq!(draft.text(), "hello");
        assert_eq!(draft.before_cursor(), "hel");

        draft.move_cursor_home();
        draft.delete_char_forward();
        assert_eq!(draft.text(), "ello");

        draft.move_cursor_end();
        draft.delete_char();
        assert_eq!(draft.text(), "ell");
    }

    #[test]
    fn draft_input_deletes_whole_graphemes() {
        let mut draft = DraftInput::with_text("café 🦀");
        draft.delete_char();
        assert_eq!(draft.text(), "café ");
        assert_eq!(draft.cursor(), 5);
    }

    #[test]
    fn take_text_resets_cursor() {
        let mut draft = DraftInput::with_text("abc");
        assert_eq!(draft.take_text(), "abc");
        assert!(draft.is_empty());
        assert_eq!(draft.cursor(), 0);
    }

    #[test]
    fn pin_pad_accepts_digits_up_to_eight() {
        let mut pin = PinPad::default();
        for key in "123456789".chars() {
            pin.push(key);
        }
        assert_eq!(pin.as_str(), "12345678");
        assert!(pin.is_full());
        assert!(!pin.push('9'));

        pin.pop();
        assert_eq!(pin.len(), 7);
        assert!(!pin.push('x'));
    }

    #[test]
    fn pin_pad_debug_hides_digits() {
        let mut pin = PinPad::default();
        pin.push('4');
        pin.push('2');
        let debug = format!("{pin:?}");
        assert!(!debug.contains("42"));
    }
}
