//! Single-question session.
//!
//! One question, one cursor, inline notes per option. Confirming the
//! synthetic "Other" row without a note forces the note editor open; the
//! session only completes once the selection is valid.

use std::collections::HashMap;

use askpane_protocol::Question;
use askpane_protocol::Selection;
use crossterm::event::KeyEvent;
use tracing::debug;

use crate::editor::EditorEvent;
use crate::editor::NoteEditor;
use crate::options::OptionList;
use crate::options::build_single_selection;
use crate::session::SessionEvent;
use crate::session::SessionOutcome;
use crate::session::browsing_event;
use crate::session::is_cancel_chord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Phase {
    Browsing,
    EditingNote,
    Done(Selection),
    Cancelled,
}

pub struct SingleQuestionSession {
    question: Question,
    options: OptionList,
    cursor: usize,
    notes: HashMap<usize, String>,
    editor: NoteEditor,
    phase: Phase,
}

impl SingleQuestionSession {
    pub fn new(question: Question) -> Self {
        let options = OptionList::new(&question);
        let cursor = options.initial_cursor();
        Self {
            question,
            options,
            cursor,
            notes: HashMap::new(),
            editor: NoteEditor::default(),
            phase: Phase::Browsing,
        }
    }

    /// Feed one raw key press; returns whether a re-render is needed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.phase {
            Phase::Done(_) | Phase::Cancelled => false,
            Phase::EditingNote => {
                if is_cancel_chord(key) {
                    return self.apply(SessionEvent::Cancel);
                }
                self.apply_note_key(key)
            }
            Phase::Browsing => match browsing_event(key) {
                Some(event) => self.apply(event),
                None => false,
            },
        }
    }

    /// Browsing-mode transition.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        if matches!(self.phase, Phase::Done(_) | Phase::Cancelled) {
            return false;
        }
        if matches!(self.phase, Phase::EditingNote) && event != SessionEvent::Cancel {
            return false;
        }
        match event {
            SessionEvent::MoveUp => {
                let previous = self.cursor;
                self.cursor = self.cursor.saturating_sub(1);
                self.cursor != previous
            }
            SessionEvent::MoveDown => {
                let previous = self.cursor;
                self.cursor = self.options.clamp(self.cursor + 1);
                self.cursor != previous
            }
            SessionEvent::BeginNote => {
                self.open_note_editor();
                true
            }
            SessionEvent::Confirm => {
                let note = self.stored_note(self.cursor);
                if self.options.is_other(self.cursor) && note.trim().is_empty() {
                    // "Other" needs content; capture it before completing.
                    self.open_note_editor();
                } else {
                    self.complete(&note);
                }
                true
            }
            SessionEvent::Cancel => {
                self.notes.clear();
                self.phase = Phase::Cancelled;
                debug!(question = %self.question.id, "single-question session cancelled");
                true
            }
            SessionEvent::Toggle | SessionEvent::PrevTab | SessionEvent::NextTab => false,
        }
    }

    /// Note-editing transition: feed the key to the editor and react.
    pub fn apply_note_key(&mut self, key: KeyEvent) -> bool {
        if !matches!(self.phase, Phase::EditingNote) {
            return false;
        }
        match self.editor.handle_key(key) {
            EditorEvent::Changed => {
                // Live echo: the inline label re-renders on every keystroke.
                self.notes
                    .insert(self.cursor, self.editor.text().to_string());
                true
            }
            EditorEvent::Cancelled => {
                // Buffer is preserved even though it was not submitted.
                self.notes
                    .insert(self.cursor, self.editor.text().to_string());
                self.phase = Phase::Browsing;
                true
            }
            EditorEvent::Submitted(text) => {
                if self.options.is_other(self.cursor) && text.trim().is_empty() {
                    // Reject: "Other" requires content. Stay in the editor.
                    return true;
                }
                self.notes.insert(self.cursor, text.clone());
                self.complete(&text);
                true
            }
            EditorEvent::Ignored => false,
        }
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        match &self.phase {
            Phase::Done(selection) => Some(SessionOutcome::Completed(vec![selection.clone()])),
            Phase::Cancelled => Some(SessionOutcome::Cancelled),
            _ => None,
        }
    }

    pub fn is_editing_note(&self) -> bool {
        matches!(self.phase, Phase::EditingNote)
    }

    fn open_note_editor(&mut self) {
        self.editor.set_text(self.stored_note(self.cursor));
        self.phase = Phase::EditingNote;
    }

    fn complete(&mut self, note: &str) {
        let label = self.options.display_label(self.cursor);
        let selection = build_single_selection(&label, note);
        debug!(question = %self.question.id, "single-question session completed");
        self.phase = Phase::Done(selection);
    }

    fn stored_note(&self, idx: usize) -> String {
        self.notes.get(&idx).cloned().unwrap_or_default()
    }

    // Render-facing accessors.

    pub(crate) fn question(&self) -> &Question {
        &self.question
    }

    pub(crate) fn options(&self) -> &OptionList {
        &self.options
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn note_for(&self, idx: usize) -> &str {
        self.notes.get(&idx).map(String::as_str).unwrap_or_default()
    }
}
