//! Multi-question tabbed session.
//!
//! N question tabs plus a synthetic submit tab at index N. Tab navigation
//! cycles in both directions regardless of validity; submission is gated on
//! every question being valid. Selections persist as index sets and
//! validity is computed on demand, never stored.

use std::collections::HashMap;

use askpane_protocol::Question;
use askpane_protocol::Selection;
use crossterm::event::KeyEvent;
use tracing::debug;

use crate::editor::EditorEvent;
use crate::editor::NoteEditor;
use crate::options::OptionList;
use crate::options::build_multi_selection;
use crate::options::build_single_selection;
use crate::session::SessionEvent;
use crate::session::SessionOutcome;
use crate::session::browsing_event;
use crate::session::is_cancel_chord;

pub(crate) struct QuestionTab {
    pub(crate) question: Question,
    pub(crate) options: OptionList,
    pub(crate) cursor: usize,
    /// Selected option indexes, kept in ascending order.
    pub(crate) selected: Vec<usize>,
    pub(crate) notes: HashMap<usize, String>,
}

impl QuestionTab {
    fn new(question: Question) -> Self {
        let options = OptionList::new(&question);
        let cursor = options.initial_cursor();
        Self {
            question,
            options,
            cursor,
            selected: Vec::new(),
            notes: HashMap::new(),
        }
    }

    pub(crate) fn note_for(&self, idx: usize) -> &str {
        self.notes.get(&idx).map(String::as_str).unwrap_or_default()
    }

    /// Submittable iff at least one option is selected and a selected
    /// "Other" row carries a non-empty trimmed note.
    pub(crate) fn is_valid(&self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        let other = self.options.other_index();
        !self.selected.contains(&other) || !self.note_for(other).trim().is_empty()
    }

    /// Current answer, built through the canonical selection builders.
    pub(crate) fn selection(&self) -> Selection {
        if self.question.multi {
            build_multi_selection(
                &self.options.display_labels(),
                &self.selected,
                &self.notes,
                self.options.other_index(),
            )
        } else {
            match self.selected.first() {
                Some(&idx) => {
                    build_single_selection(&self.options.display_label(idx), self.note_for(idx))
                }
                None => Selection::default(),
            }
        }
    }

    /// Toggle membership of `idx`, preserving ascending order. Returns
    /// whether the index ended up selected.
    fn toggle(&mut self, idx: usize) -> bool {
        match self.selected.iter().position(|&sel| sel == idx) {
            Some(pos) => {
                self.selected.remove(pos);
                false
            }
            None => {
                let insert_at = self.selected.partition_point(|&sel| sel < idx);
                self.selected.insert(insert_at, idx);
                true
            }
        }
    }

    fn select_only(&mut self, idx: usize) {
        self.selected = vec![idx];
    }
}

pub struct TabbedSession {
    tabs: Vec<QuestionTab>,
    /// `0..tabs.len()` are question tabs; `tabs.len()` is the submit tab.
    active_tab: usize,
    editor: NoteEditor,
    editing: bool,
    outcome: Option<SessionOutcome>,
}

impl TabbedSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            tabs: questions.into_iter().map(QuestionTab::new).collect(),
            active_tab: 0,
            editor: NoteEditor::default(),
            editing: false,
            outcome: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        if self.editing {
            if is_cancel_chord(key) {
                return self.apply(SessionEvent::Cancel);
            }
            return self.apply_note_key(key);
        }
        match browsing_event(key) {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    /// Browsing-mode transition.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        if self.editing && event != SessionEvent::Cancel {
            return false;
        }
        match event {
            SessionEvent::PrevTab => {
                let tab_count = self.tab_count();
                self.active_tab = (self.active_tab + tab_count - 1) % tab_count;
                true
            }
            SessionEvent::NextTab => {
                self.active_tab = (self.active_tab + 1) % self.tab_count();
                true
            }
            SessionEvent::MoveUp => {
                let Some(tab) = self.active_question_tab_mut() else {
                    return false;
                };
                let previous = tab.cursor;
                tab.cursor = tab.cursor.saturating_sub(1);
                tab.cursor != previous
            }
            SessionEvent::MoveDown => {
                let Some(tab) = self.active_question_tab_mut() else {
                    return false;
                };
                let previous = tab.cursor;
                tab.cursor = tab.options.clamp(tab.cursor + 1);
                tab.cursor != previous
            }
            SessionEvent::Toggle => self.toggle_at_cursor(),
            SessionEvent::Confirm => self.confirm(),
            SessionEvent::BeginNote => {
                let Some(tab) = self.active_question_tab_mut() else {
                    return false;
                };
                let note = tab.note_for(tab.cursor).to_string();
                self.editor.set_text(note);
                self.editing = true;
                true
            }
            SessionEvent::Cancel => {
                debug!("tabbed session cancelled");
                self.outcome = Some(SessionOutcome::Cancelled);
                true
            }
        }
    }

    /// Note-editing transition: feed the key to the editor and react.
    pub fn apply_note_key(&mut self, key: KeyEvent) -> bool {
        if !self.editing || self.outcome.is_some() {
            return false;
        }
        match self.editor.handle_key(key) {
            EditorEvent::Changed => {
                let text = self.editor.text().to_string();
                if let Some(tab) = self.active_question_tab_mut() {
                    // Live echo on every keystroke.
                    tab.notes.insert(tab.cursor, text);
                }
                true
            }
            EditorEvent::Cancelled => {
                let text = self.editor.text().to_string();
                if let Some(tab) = self.active_question_tab_mut() {
                    tab.notes.insert(tab.cursor, text);
                }
                self.editing = false;
                true
            }
            EditorEvent::Submitted(text) => self.submit_note(text),
            EditorEvent::Ignored => false,
        }
    }

    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_editing_note(&self) -> bool {
        self.editing
    }

    /// Overall readiness: every question valid.
    pub fn all_valid(&self) -> bool {
        self.tabs.iter().all(QuestionTab::is_valid)
    }

    fn confirm(&mut self) -> bool {
        if self.on_submit_tab() {
            if !self.all_valid() {
                // No-op until every question is submittable.
                return false;
            }
            let selections = self.tabs.iter().map(QuestionTab::selection).collect();
            debug!("tabbed session completed");
            self.outcome = Some(SessionOutcome::Completed(selections));
            return true;
        }
        let Some(tab) = self.active_question_tab_mut() else {
            return false;
        };
        if tab.question.multi {
            // Enter on a multi tab moves on; Space does the toggling.
            self.advance_tab();
            return true;
        }
        self.toggle_at_cursor()
    }

    /// Select (non-multi) or toggle (multi) the cursor option.
    fn toggle_at_cursor(&mut self) -> bool {
        let Some(tab) = self.active_question_tab_mut() else {
            return false;
        };
        let cursor = tab.cursor;
        let is_other = tab.options.is_other(cursor);
        if tab.question.multi {
            let now_selected = tab.toggle(cursor);
            if now_selected && is_other && tab.note_for(cursor).trim().is_empty() {
                let note = tab.note_for(cursor).to_string();
                self.editor.set_text(note);
                self.editing = true;
            }
            return true;
        }
        tab.select_only(cursor);
        if is_other && tab.note_for(cursor).trim().is_empty() {
            let note = tab.note_for(cursor).to_string();
            self.editor.set_text(note);
            self.editing = true;
        } else {
            self.advance_tab();
        }
        true
    }

    fn submit_note(&mut self, text: String) -> bool {
        let Some(tab) = self.active_question_tab_mut() else {
            self.editing = false;
            return true;
        };
        let cursor = tab.cursor;
        let is_other = tab.options.is_other(cursor);
        let trimmed_empty = text.trim().is_empty();
        tab.notes.insert(cursor, text);
        if tab.question.multi {
            if !trimmed_empty && !tab.selected.contains(&cursor) {
                tab.toggle(cursor);
            }
            if is_other && trimmed_empty {
                // "Other" requires content; stay in the editor.
                return true;
            }
            self.editing = false;
            return true;
        }
        if is_other && trimmed_empty {
            return true;
        }
        tab.select_only(cursor);
        self.editing = false;
        self.advance_tab();
        true
    }

    /// Clamped advance used after answering: never wraps past the submit tab.
    fn advance_tab(&mut self) {
        self.active_tab = (self.active_tab + 1).min(self.submit_tab_index());
    }

    fn active_question_tab_mut(&mut self) -> Option<&mut QuestionTab> {
        let idx = self.active_tab;
        self.tabs.get_mut(idx)
    }

    // Render-facing accessors.

    pub(crate) fn tabs(&self) -> &[QuestionTab] {
        &self.tabs
    }

    pub(crate) fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub(crate) fn submit_tab_index(&self) -> usize {
        self.tabs.len()
    }

    pub(crate) fn on_submit_tab(&self) -> bool {
        self.active_tab == self.submit_tab_index()
    }

    fn tab_count(&self) -> usize {
        self.tabs.len() + 1
    }
}
