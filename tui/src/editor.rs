//! Minimal single-line note editor.
//!
//! The sessions consume this through a narrow surface: seed text with
//! [`NoteEditor::set_text`], feed key events, observe `Changed` /
//! `Submitted` / `Cancelled`. Cursor movement is grapheme-aware so combined
//! characters never split.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditorEvent {
    /// Text or cursor changed; the host should re-render.
    Changed,
    /// Enter pressed; carries the full buffer.
    Submitted(String),
    /// Esc pressed; the buffer is left intact for the caller to stash.
    Cancelled,
    /// Key not handled by the editor.
    Ignored,
}

#[derive(Debug, Default)]
pub(crate) struct NoteEditor {
    text: String,
    /// Byte offset of the insertion point, always on a grapheme boundary.
    cursor: usize,
}

impl NoteEditor {
    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> EditorEvent {
        match key.code {
            KeyCode::Enter => EditorEvent::Submitted(self.text.clone()),
            KeyCode::Esc => EditorEvent::Cancelled,
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.text.insert(self.cursor, ch);
                self.cursor += ch.len_utf8();
                EditorEvent::Changed
            }
            KeyCode::Backspace => {
                if let Some(start) = self.prev_boundary() {
                    self.text.replace_range(start..self.cursor, "");
                    self.cursor = start;
                    EditorEvent::Changed
                } else {
                    EditorEvent::Ignored
                }
            }
            KeyCode::Delete => {
                if let Some(end) = self.next_boundary() {
                    self.text.replace_range(self.cursor..end, "");
                    EditorEvent::Changed
                } else {
                    EditorEvent::Ignored
                }
            }
            KeyCode::Left => {
                if let Some(start) = self.prev_boundary() {
                    self.cursor = start;
                    EditorEvent::Changed
                } else {
                    EditorEvent::Ignored
                }
            }
            KeyCode::Right => {
                if let Some(end) = self.next_boundary() {
                    self.cursor = end;
                    EditorEvent::Changed
                } else {
                    EditorEvent::Ignored
                }
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditorEvent::Changed
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                EditorEvent::Changed
            }
            _ => EditorEvent::Ignored,
        }
    }

    /// Byte offset of the grapheme boundary before the cursor.
    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .last()
            .map(|(idx, _)| idx)
    }

    /// Byte offset of the grapheme boundary after the cursor.
    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|grapheme| self.cursor + grapheme.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(editor: &mut NoteEditor, text: &str) {
        for ch in text.chars() {
            editor.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut editor = NoteEditor::default();
        type_str(&mut editor, "abc");
        assert_eq!(editor.text(), "abc");
        editor.handle_key(key(KeyCode::Left));
        type_str(&mut editor, "X");
        assert_eq!(editor.text(), "abXc");
    }

    #[test]
    fn backspace_removes_whole_graphemes() {
        let mut editor = NoteEditor::default();
        // "e" followed by a combining acute accent forms one grapheme.
        editor.set_text("ae\u{301}");
        assert_eq!(editor.handle_key(key(KeyCode::Backspace)), EditorEvent::Changed);
        assert_eq!(editor.text(), "a");
    }

    #[test]
    fn submit_carries_the_full_buffer() {
        let mut editor = NoteEditor::default();
        editor.set_text("draft");
        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            EditorEvent::Submitted("draft".to_string())
        );
        // Buffer survives submission; the session decides what to do next.
        assert_eq!(editor.text(), "draft");
    }

    #[test]
    fn esc_cancels_without_clearing() {
        let mut editor = NoteEditor::default();
        editor.set_text("draft");
        assert_eq!(editor.handle_key(key(KeyCode::Esc)), EditorEvent::Cancelled);
        assert_eq!(editor.text(), "draft");
    }

    #[test]
    fn control_chords_are_ignored() {
        let mut editor = NoteEditor::default();
        let chord = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(editor.handle_key(chord), EditorEvent::Ignored);
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn home_and_end_move_the_cursor() {
        let mut editor = NoteEditor::default();
        editor.set_text("note");
        editor.handle_key(key(KeyCode::Home));
        type_str(&mut editor, ">");
        assert_eq!(editor.text(), ">note");
        editor.handle_key(key(KeyCode::End));
        type_str(&mut editor, "<");
        assert_eq!(editor.text(), ">note<");
    }
}
