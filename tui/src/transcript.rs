//! Result assembly: transcript text and structured details.
//!
//! Everything embedded in the transcript passes through
//! [`sanitize_session_text`]; the details payload keeps the original,
//! unsanitized text so machine consumers see exactly what the caller sent.

use askpane_protocol::AskDetails;
use askpane_protocol::OTHER_LABEL;
use askpane_protocol::Question;
use askpane_protocol::QuestionResult;
use askpane_protocol::Selection;

use crate::options::append_recommended_tag;

const UNKNOWN_PLACEHOLDER: &str = "(unknown)";
const EMPTY_QUESTION_PLACEHOLDER: &str = "(empty question)";
const EMPTY_OPTION_PLACEHOLDER: &str = "(empty option)";
const NOT_ANSWERED: &str = "(not answered)";
const CANCELLED: &str = "(cancelled)";

/// Transcript-facing sanitizer: collapse every whitespace run (newlines and
/// tabs included) to a single space, strip control characters, trim.
///
/// Stricter than the UI sanitizer in the note formatter, which keeps
/// repeated spaces for faithful inline editing.
pub fn sanitize_session_text(raw: &str) -> String {
    let printable: String = raw
        .chars()
        .filter_map(|ch| match ch {
            ch if ch.is_whitespace() => Some(' '),
            ch if ch.is_control() => None,
            ch => Some(ch),
        })
        .collect();
    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn sanitized_or(raw: &str, placeholder: &str) -> String {
    let sanitized = sanitize_session_text(raw);
    if sanitized.is_empty() {
        placeholder.to_string()
    } else {
        sanitized
    }
}

/// Render one selection as the transcript's compact value.
pub(crate) fn summary_value(question: &Question, selection: &Selection, cancelled: bool) -> String {
    let custom = selection
        .custom_input
        .as_deref()
        .map(|note| sanitized_or(note, UNKNOWN_PLACEHOLDER));
    if selection.selected_options.is_empty() {
        return match custom {
            Some(custom) => format!("\"{custom}\""),
            None if cancelled => CANCELLED.to_string(),
            None => NOT_ANSWERED.to_string(),
        };
    }
    let values: Vec<String> = selection
        .selected_options
        .iter()
        .map(|value| sanitized_or(value, EMPTY_OPTION_PLACEHOLDER))
        .collect();
    let body = if question.multi {
        format!("[{}]", values.join(", "))
    } else {
        values.join(", ")
    };
    match custom {
        Some(custom) => format!("{body} + Other: \"{custom}\""),
        None => body,
    }
}

/// One `"<id>: <value>"` line.
pub(crate) fn summary_line(question: &Question, selection: &Selection, cancelled: bool) -> String {
    let id = sanitized_or(&question.id, UNKNOWN_PLACEHOLDER);
    let value = summary_value(question, selection, cancelled);
    format!("{id}: {value}")
}

/// Full per-question context block: prompt, the option list as presented
/// (recommended tag and synthetic "Other" row included), and the response.
pub(crate) fn context_block(question: &Question, selection: &Selection, cancelled: bool) -> String {
    let mut block = String::new();
    block.push_str(&format!(
        "Question: {}\n",
        sanitized_or(&question.question, EMPTY_QUESTION_PLACEHOLDER)
    ));
    block.push_str("Options:\n");
    let labels: Vec<String> = question
        .options
        .iter()
        .map(|option| option.label.clone())
        .collect();
    let mut labels = append_recommended_tag(&labels, question.recommended);
    labels.push(OTHER_LABEL.to_string());
    for (idx, label) in labels.iter().enumerate() {
        block.push_str(&format!(
            "  {}. {}\n",
            idx + 1,
            sanitized_or(label, EMPTY_OPTION_PLACEHOLDER)
        ));
    }
    block.push_str(&format!(
        "Response: {}",
        summary_value(question, selection, cancelled)
    ));
    if let Some(custom) = selection.custom_input.as_deref() {
        block.push_str(&format!(
            "\nCustom input: \"{}\"",
            sanitized_or(custom, UNKNOWN_PLACEHOLDER)
        ));
    }
    block
}

/// The replayable transcript: one summary line per question in call order,
/// then a blank line, then the per-question context blocks.
pub fn render_transcript(pairs: &[(Question, Selection)], cancelled: bool) -> String {
    let summaries: Vec<String> = pairs
        .iter()
        .map(|(question, selection)| summary_line(question, selection, cancelled))
        .collect();
    let blocks: Vec<String> = pairs
        .iter()
        .map(|(question, selection)| context_block(question, selection, cancelled))
        .collect();
    format!("{}\n\n{}", summaries.join("\n"), blocks.join("\n\n"))
}

/// Structured details mirroring the transcript, with original text.
pub fn build_details(pairs: &[(Question, Selection)]) -> AskDetails {
    let mut results: Vec<QuestionResult> = pairs
        .iter()
        .map(|(question, selection)| QuestionResult {
            id: question.id.clone(),
            question: question.question.clone(),
            options: question
                .options
                .iter()
                .map(|option| option.label.clone())
                .collect(),
            multi: question.multi,
            selected_options: selection.selected_options.clone(),
            custom_input: selection.custom_input.clone(),
        })
        .collect();
    if results.len() == 1 {
        match results.pop() {
            Some(result) => AskDetails::Single(result),
            None => AskDetails::default(),
        }
    } else {
        AskDetails::Multi { results }
    }
}
