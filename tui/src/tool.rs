//! Inbound boundary: from host arguments to a running flow and back to a
//! `ToolOutput`.
//!
//! Usage errors (no interactive surface, empty question list, malformed
//! questions) are reported as successful outputs whose content is a
//! diagnostic string; nothing here propagates an error to the host.

use askpane_protocol::AskArgs;
use askpane_protocol::AskDetails;
use askpane_protocol::Question;
use askpane_protocol::Selection;
use askpane_protocol::ToolOutput;
use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tracing::debug;
use tracing::warn;

use crate::render::Renderable;
use crate::session::SessionOutcome;
use crate::session::single::SingleQuestionSession;
use crate::session::tabbed::TabbedSession;
use crate::transcript::build_details;
use crate::transcript::render_transcript;

pub const NON_INTERACTIVE_DIAGNOSTIC: &str = "ask tool requires interactive mode";
pub const NO_QUESTIONS_DIAGNOSTIC: &str = "ask tool requires at least one question";

fn diagnostic(content: impl Into<String>) -> ToolOutput {
    ToolOutput {
        content: content.into(),
        details: AskDetails::default(),
    }
}

/// Gate a tool call before any session starts. `Err` carries the complete
/// diagnostic output to hand back to the host.
pub fn preflight(args: &AskArgs, interactive: bool) -> Result<(), Box<ToolOutput>> {
    if !interactive {
        warn!("ask tool invoked without an interactive surface");
        return Err(Box::new(diagnostic(NON_INTERACTIVE_DIAGNOSTIC)));
    }
    if args.questions.is_empty() {
        return Err(Box::new(diagnostic(NO_QUESTIONS_DIAGNOSTIC)));
    }
    if let Err(err) = args.validate() {
        warn!(%err, "rejecting malformed ask tool arguments");
        return Err(Box::new(diagnostic(err.to_string())));
    }
    Ok(())
}

enum FlowKind {
    Single(SingleQuestionSession),
    Tabbed(TabbedSession),
}

/// One in-flight tool call: the questions plus the session driving them.
pub struct AskFlow {
    questions: Vec<Question>,
    kind: FlowKind,
}

/// Start the right session for the question set: a lone non-multi question
/// runs the single-question flow; anything else gets tabs.
pub fn start(questions: Vec<Question>) -> AskFlow {
    let kind = match questions.as_slice() {
        [question] if !question.multi => FlowKind::Single(SingleQuestionSession::new(
            question.clone(),
        )),
        _ => FlowKind::Tabbed(TabbedSession::new(questions.clone())),
    };
    debug!(questions = questions.len(), "starting ask session");
    AskFlow { questions, kind }
}

impl AskFlow {
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match &mut self.kind {
            FlowKind::Single(session) => session.handle_key(key),
            FlowKind::Tabbed(session) => session.handle_key(key),
        }
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        match &self.kind {
            FlowKind::Single(session) => session.outcome(),
            FlowKind::Tabbed(session) => session.outcome().cloned(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.outcome().is_some()
    }

    /// The boundary artifact, once the session has ended.
    pub fn output(&self) -> Option<ToolOutput> {
        self.outcome()
            .map(|outcome| finish(&self.questions, &outcome))
    }
}

impl Renderable for AskFlow {
    fn desired_height(&self, width: u16) -> u16 {
        match &self.kind {
            FlowKind::Single(session) => session.desired_height(width),
            FlowKind::Tabbed(session) => session.desired_height(width),
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        match &self.kind {
            FlowKind::Single(session) => session.render(area, buf),
            FlowKind::Tabbed(session) => session.render(area, buf),
        }
    }
}

/// Map a finished session onto the transcript plus details payload.
///
/// Cancellation yields an empty selection for every question; a selection
/// count mismatch (which a correct session never produces) is padded
/// defensively rather than treated as fatal.
pub fn finish(questions: &[Question], outcome: &SessionOutcome) -> ToolOutput {
    let (mut selections, cancelled) = match outcome {
        SessionOutcome::Completed(selections) => (selections.clone(), false),
        SessionOutcome::Cancelled => (vec![Selection::default(); questions.len()], true),
    };
    selections.resize(questions.len(), Selection::default());
    let pairs: Vec<(Question, Selection)> = questions
        .iter()
        .cloned()
        .zip(selections)
        .collect();
    ToolOutput {
        content: render_transcript(&pairs, cancelled),
        details: build_details(&pairs),
    }
}
