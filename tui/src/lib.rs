//! Interactive question/answer widget for the terminal.
//!
//! The host hands over a list of structured questions; the widget drives the
//! user through selection (single-question or tabbed multi-question flow,
//! with inline per-option notes and a free-text "Other" escape hatch) and
//! returns a sanitized transcript plus a structured details payload.

mod editor;
mod notes;
mod options;
mod render;
pub mod session;
mod tool;
mod transcript;
mod wrapping;

pub use options::OTHER_LABEL;
pub use options::RECOMMENDED_SUFFIX;
pub use options::append_recommended_tag;
pub use options::build_multi_selection;
pub use options::build_single_selection;
pub use options::strip_recommended_tag;
pub use render::Renderable;
pub use session::SessionEvent;
pub use session::SessionOutcome;
pub use session::single::SingleQuestionSession;
pub use session::tabbed::TabbedSession;
pub use tool::AskFlow;
pub use tool::NO_QUESTIONS_DIAGNOSTIC;
pub use tool::NON_INTERACTIVE_DIAGNOSTIC;
pub use tool::finish;
pub use tool::preflight;
pub use tool::start;
pub use transcript::build_details;
pub use transcript::render_transcript;
pub use transcript::sanitize_session_text;
