//! Terminal rendering for the sessions.
//!
//! Rendering is a pure function of session state: each session exposes
//! `lines(width)` and the `Renderable` impl paints those lines into the
//! caller's buffer. No session state changes here.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

use crate::notes::wrapped_option_label_with_inline_note;
use crate::options::OptionList;
use crate::session::single::SingleQuestionSession;
use crate::session::tabbed::TabbedSession;
use crate::transcript::sanitize_session_text;
use crate::transcript::summary_line;
use crate::wrapping::word_wrap;

/// Height negotiation plus buffer painting, in the style of a bottom-pane
/// overlay: the host asks how tall the widget wants to be at a width, then
/// hands it exactly that area.
pub trait Renderable {
    fn desired_height(&self, width: u16) -> u16;
    fn render(&self, area: Rect, buf: &mut Buffer);
}

const TIP_SEPARATOR: &str = " | ";
const VALID_MARKER: &str = "●";
const INVALID_MARKER: &str = "○";

#[derive(Clone, Debug)]
struct FooterTip {
    text: &'static str,
    highlight: bool,
}

impl FooterTip {
    fn new(text: &'static str) -> Self {
        Self {
            text,
            highlight: false,
        }
    }

    fn highlighted(text: &'static str) -> Self {
        Self {
            text,
            highlight: true,
        }
    }
}

fn footer_line(tips: &[FooterTip]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    for (idx, tip) in tips.iter().enumerate() {
        if idx > 0 {
            spans.push(TIP_SEPARATOR.into());
        }
        if tip.highlight {
            spans.push(tip.text.cyan().bold().not_dim());
        } else {
            spans.push(tip.text.into());
        }
    }
    Line::from(spans).dim()
}

fn question_lines(text: &str, width: usize) -> Vec<Line<'static>> {
    word_wrap(&sanitize_session_text(text), width)
        .into_iter()
        .map(|line| Line::from(line).cyan())
        .collect()
}

/// Rows for one option list: cursor marker, optional selection marker,
/// display label with the inline note, soft-wrapped with continuation
/// lines indented under the label.
fn option_lines(
    options: &OptionList,
    cursor: usize,
    selected: Option<&[usize]>,
    multi: bool,
    note_for: &dyn Fn(usize) -> String,
    editing: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for idx in 0..options.len() {
        let is_cursor = idx == cursor;
        let cursor_marker = if is_cursor { "> " } else { "  " };
        let select_marker = match selected {
            None => String::new(),
            Some(selected) => {
                let mark = if selected.contains(&idx) { 'x' } else { ' ' };
                if multi {
                    format!("[{mark}] ")
                } else {
                    format!("({mark}) ")
                }
            }
        };
        let prefix = format!("{cursor_marker}{select_marker}");
        let wrapped = wrapped_option_label_with_inline_note(
            &options.display_label(idx),
            &note_for(idx),
            editing && is_cursor,
            width,
            prefix.chars().count(),
        );
        for (line_idx, body) in wrapped.into_iter().enumerate() {
            let text = if line_idx == 0 {
                format!("{prefix}{body}")
            } else {
                format!("{}{body}", " ".repeat(prefix.chars().count()))
            };
            let line = if is_cursor {
                Line::from(text).cyan()
            } else {
                Line::from(text)
            };
            lines.push(line);
        }
    }
    lines
}

impl SingleQuestionSession {
    pub(crate) fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = width.max(1) as usize;
        let mut lines = question_lines(&self.question().question, width);
        lines.push(Line::default());
        lines.extend(option_lines(
            self.options(),
            self.cursor(),
            None,
            false,
            &|idx| self.note_for(idx).to_string(),
            self.is_editing_note(),
            width,
        ));
        lines.push(Line::default());
        let tips = if self.is_editing_note() {
            vec![
                FooterTip::highlighted("Enter: save note"),
                FooterTip::new("Esc: back"),
            ]
        } else {
            vec![
                FooterTip::new("\u{2191}/\u{2193} move"),
                FooterTip::new("Enter: confirm"),
                FooterTip::new("Tab: add note"),
                FooterTip::new("Esc: cancel"),
            ]
        };
        lines.push(footer_line(&tips));
        lines
    }
}

impl Renderable for SingleQuestionSession {
    fn desired_height(&self, width: u16) -> u16 {
        self.lines(width).len() as u16
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Paragraph::new(Text::from(self.lines(area.width))).render(area, buf);
    }
}

impl TabbedSession {
    fn header_line(&self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (idx, tab) in self.tabs().iter().enumerate() {
            if idx > 0 {
                spans.push("  ".into());
            }
            let marker = if tab.is_valid() {
                VALID_MARKER
            } else {
                INVALID_MARKER
            };
            let label = format!("{marker} {}", sanitize_session_text(&tab.question.id));
            if idx == self.active_tab() {
                spans.push(label.cyan().bold());
            } else {
                spans.push(label.dim());
            }
        }
        spans.push("  ".into());
        let submit_marker = if self.all_valid() {
            VALID_MARKER
        } else {
            INVALID_MARKER
        };
        let submit_label = format!("{submit_marker} Submit");
        if self.on_submit_tab() {
            spans.push(submit_label.cyan().bold());
        } else {
            spans.push(submit_label.dim());
        }
        Line::from(spans)
    }

    /// Read-through of every question's current answer with its validity
    /// marker, shown on the submit tab.
    fn submit_lines(&self) -> Vec<Line<'static>> {
        self.tabs()
            .iter()
            .map(|tab| {
                let marker = if tab.is_valid() {
                    VALID_MARKER
                } else {
                    INVALID_MARKER
                };
                let text = format!(
                    "{marker} {}",
                    summary_line(&tab.question, &tab.selection(), false)
                );
                if tab.is_valid() {
                    Line::from(text)
                } else {
                    Line::from(text).dim()
                }
            })
            .collect()
    }

    pub(crate) fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = width.max(1) as usize;
        let mut lines = vec![self.header_line(), Line::default()];
        if self.on_submit_tab() {
            lines.extend(self.submit_lines());
        } else if let Some(tab) = self.tabs().get(self.active_tab()) {
            lines.extend(question_lines(&tab.question.question, width));
            lines.push(Line::default());
            lines.extend(option_lines(
                &tab.options,
                tab.cursor,
                Some(&tab.selected),
                tab.question.multi,
                &|idx| tab.note_for(idx).to_string(),
                self.is_editing_note(),
                width,
            ));
        }
        lines.push(Line::default());
        let tips = if self.is_editing_note() {
            vec![
                FooterTip::highlighted("Enter: save note"),
                FooterTip::new("Esc: back"),
            ]
        } else if self.on_submit_tab() {
            let submit_tip = if self.all_valid() {
                FooterTip::highlighted("Enter: submit all answers")
            } else {
                FooterTip::new("answer all questions to submit")
            };
            vec![
                submit_tip,
                FooterTip::new("\u{2190}/\u{2192} switch tab"),
                FooterTip::new("Esc: cancel"),
            ]
        } else {
            vec![
                FooterTip::new("\u{2190}/\u{2192} switch tab"),
                FooterTip::new("\u{2191}/\u{2193} move"),
                FooterTip::new("Space: select"),
                FooterTip::new("Tab: add note"),
                FooterTip::new("Esc: cancel"),
            ]
        };
        lines.push(footer_line(&tips));
        lines
    }
}

impl Renderable for TabbedSession {
    fn desired_height(&self, width: u16) -> u16 {
        self.lines(width).len() as u16
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Paragraph::new(Text::from(self.lines(area.width))).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionEvent;
    use askpane_protocol::Question;
    use askpane_protocol::QuestionOption;
    use pretty_assertions::assert_eq;

    fn question(id: &str, multi: bool) -> Question {
        Question {
            id: id.to_string(),
            question: "Which store should hold sessions?".to_string(),
            options: vec![QuestionOption::new("JWT"), QuestionOption::new("Session")],
            multi,
            recommended: Some(1),
        }
    }

    fn snapshot_buffer(buf: &Buffer) -> String {
        let mut lines = Vec::new();
        for y in 0..buf.area().height {
            let mut row = String::new();
            for x in 0..buf.area().width {
                row.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            lines.push(row.trim_end().to_string());
        }
        lines.join("\n")
    }

    fn render_to_string<R: Renderable>(renderable: &R, width: u16) -> String {
        let height = renderable.desired_height(width);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        renderable.render(area, &mut buf);
        snapshot_buffer(&buf)
    }

    #[test]
    fn single_session_renders_question_options_and_footer() {
        let session = SingleQuestionSession::new(question("auth", false));
        let snapshot = render_to_string(&session, 60);
        assert_eq!(
            snapshot,
            "Which store should hold sessions?\n\
             \n\
             \x20 JWT\n\
             > Session (Recommended)\n\
             \x20 Other (type your own)\n\
             \n\
             \u{2191}/\u{2193} move | Enter: confirm | Tab: add note | Esc: cancel"
        );
    }

    #[test]
    fn single_session_shows_inline_note_with_cursor_while_editing() {
        let mut session = SingleQuestionSession::new(question("auth", false));
        session.apply(SessionEvent::BeginNote);
        let snapshot = render_to_string(&session, 60);
        assert!(snapshot.contains("> Session (Recommended) — note: █"));
        assert!(snapshot.contains("Enter: save note"));
    }

    #[test]
    fn tabbed_header_marks_validity_and_active_tab() {
        let mut session = TabbedSession::new(vec![question("auth", false), question("cache", false)]);
        let snapshot = render_to_string(&session, 60);
        assert!(snapshot.starts_with("○ auth  ○ cache  ○ Submit"));
        assert!(snapshot.contains("( ) JWT"));

        session.apply(SessionEvent::Toggle); // answer auth, move to cache
        let snapshot = render_to_string(&session, 60);
        assert!(snapshot.starts_with("● auth  ○ cache  ○ Submit"));
    }

    #[test]
    fn multi_question_rows_use_checkboxes() {
        let mut session = TabbedSession::new(vec![question("auth", true), question("cache", false)]);
        session.apply(SessionEvent::Toggle); // cursor starts on the recommended row
        let snapshot = render_to_string(&session, 60);
        assert!(snapshot.contains("> [x] Session (Recommended)"));
        assert!(snapshot.contains("  [ ] JWT"));
    }

    #[test]
    fn submit_tab_reads_through_all_answers() {
        let mut session = TabbedSession::new(vec![question("auth", false), question("cache", false)]);
        session.apply(SessionEvent::Toggle); // auth = Session (recommended cursor)
        session.apply(SessionEvent::NextTab); // skip cache
        let snapshot = render_to_string(&session, 60);
        assert!(snapshot.contains("● auth: Session"));
        assert!(snapshot.contains("○ cache: (not answered)"));
        assert!(snapshot.contains("answer all questions to submit"));
    }

    #[test]
    fn desired_height_matches_line_count() {
        let session = SingleQuestionSession::new(question("auth", false));
        assert_eq!(session.desired_height(60), 7);
    }

    #[test]
    fn zero_area_render_is_a_no_op() {
        let session = SingleQuestionSession::new(question("auth", false));
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        session.render(area, &mut buf);
        assert_eq!(buf.area().width, 0);
    }
}
