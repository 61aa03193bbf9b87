//! Session state machines.
//!
//! Both sessions are explicit structs with `(state, event)` transition
//! methods and pure render functions, so every transition is testable
//! without a terminal.

pub mod single;
pub mod tabbed;

use askpane_protocol::Selection;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

/// Canonical input events while browsing options or tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    MoveUp,
    MoveDown,
    PrevTab,
    NextTab,
    /// Select (non-multi) or toggle membership (multi) of the cursor option.
    Toggle,
    /// Confirm the current question, or the whole session on the submit tab.
    Confirm,
    /// Open the inline note editor for the cursor option.
    BeginNote,
    Cancel,
}

/// Terminal result of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// One `Selection` per question, in call order.
    Completed(Vec<Selection>),
    Cancelled,
}

impl SessionOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionOutcome::Cancelled)
    }
}

/// Map a raw key press to a browsing-mode event. Release events and
/// unbound keys map to nothing.
pub(crate) fn browsing_event(key: KeyEvent) -> Option<SessionEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_cancel_chord(key) {
        return Some(SessionEvent::Cancel);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(SessionEvent::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(SessionEvent::MoveDown),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Some(SessionEvent::PrevTab),
        KeyCode::Right | KeyCode::Char('l') => Some(SessionEvent::NextTab),
        KeyCode::Char(' ') => Some(SessionEvent::Toggle),
        KeyCode::Enter => Some(SessionEvent::Confirm),
        KeyCode::Tab => Some(SessionEvent::BeginNote),
        KeyCode::Esc => Some(SessionEvent::Cancel),
        _ => None,
    }
}

/// Ctrl+C cancels the whole session from any state, editor included.
pub(crate) fn is_cancel_chord(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
