//! Inline note formatting.
//!
//! Notes are rendered on the same display line as their option. While the
//! note is being edited the raw text is shown with a trailing cursor glyph;
//! otherwise the trimmed note is shown. Truncation keeps the tail (and the
//! cursor) during editing and the head otherwise.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::wrapping::word_wrap;

/// Glyph appended to the note text while the editor is open.
pub(crate) const EDIT_CURSOR: char = '█';

const NOTE_JOINER: &str = " — note: ";
const ELLIPSIS: char = '…';

/// UI-facing sanitizer: CR/LF/TAB each become one space, other C0/C1
/// control characters are dropped. Printable Unicode passes through
/// untouched; repeated spaces are deliberately preserved (the transcript
/// sanitizer is the one that collapses runs).
pub(crate) fn sanitize_note(raw: &str) -> String {
    raw.chars()
        .filter_map(|ch| match ch {
            '\r' | '\n' | '\t' => Some(' '),
            ch if ch.is_control() => None,
            ch => Some(ch),
        })
        .collect()
}

/// Compose `label` and its note into a single display line.
///
/// With a blank note and the editor closed, the label passes through as-is.
/// `max_len` caps the display width: 0 yields an empty string, 1 a lone
/// ellipsis; longer caps keep the head (idle) or the tail plus cursor
/// (editing), never exceeding `max_len` columns.
pub(crate) fn option_label_with_inline_note(
    label: &str,
    raw_note: &str,
    is_editing: bool,
    max_len: Option<usize>,
) -> String {
    let sanitized = sanitize_note(raw_note);
    let composed = if !is_editing && sanitized.trim().is_empty() {
        label.to_string()
    } else if is_editing {
        format!("{label}{NOTE_JOINER}{sanitized}{EDIT_CURSOR}")
    } else {
        format!("{label}{NOTE_JOINER}{}", sanitized.trim())
    };
    match max_len {
        None => composed,
        Some(max_len) => truncate_to_width(&composed, max_len, is_editing),
    }
}

/// Compose the inline label without a cap, then soft-wrap it to
/// `max(1, max_line_width - wrap_padding)` columns. Always returns at least
/// one line; the cursor glyph, when present, ends the last line.
pub(crate) fn wrapped_option_label_with_inline_note(
    label: &str,
    raw_note: &str,
    is_editing: bool,
    max_line_width: usize,
    wrap_padding: usize,
) -> Vec<String> {
    let composed = option_label_with_inline_note(label, raw_note, is_editing, None);
    let width = max_line_width.saturating_sub(wrap_padding).max(1);
    word_wrap(&composed, width)
}

/// Truncate `text` to at most `max_len` display columns.
///
/// `keep_tail` preserves the end of the string (ellipsis prefix), used while
/// editing so the cursor stays visible; otherwise the head is preserved
/// (ellipsis suffix).
fn truncate_to_width(text: &str, max_len: usize, keep_tail: bool) -> String {
    if max_len == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(text) <= max_len {
        return text.to_string();
    }
    if max_len == 1 {
        return ELLIPSIS.to_string();
    }
    let budget = max_len - 1;
    if keep_tail {
        let mut kept = std::collections::VecDeque::new();
        let mut used = 0usize;
        for ch in text.chars().rev() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + ch_width > budget {
                break;
            }
            used += ch_width;
            kept.push_front(ch);
        }
        let mut out = ELLIPSIS.to_string();
        out.extend(kept);
        out
    } else {
        let mut out = String::new();
        let mut used = 0usize;
        for ch in text.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + ch_width > budget {
                break;
            }
            used += ch_width;
            out.push(ch);
        }
        out.push(ELLIPSIS);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_replaces_line_breaks_and_strips_controls() {
        assert_eq!(sanitize_note("line1\nline2\t\x07"), "line1 line2 ");
        assert_eq!(sanitize_note("a\rb"), "a b");
        assert_eq!(sanitize_note("bell\x07\x1b[0m"), "bell[0m");
        assert_eq!(sanitize_note("héllo ✓"), "héllo ✓");
    }

    #[test]
    fn blank_note_returns_label_unchanged() {
        assert_eq!(option_label_with_inline_note("JWT", "", false, None), "JWT");
        assert_eq!(
            option_label_with_inline_note("JWT", "  \n ", false, None),
            "JWT"
        );
    }

    #[test]
    fn idle_note_is_trimmed_and_joined() {
        assert_eq!(
            option_label_with_inline_note("Session", "split-session", false, None),
            "Session — note: split-session"
        );
        assert_eq!(
            option_label_with_inline_note("Session", "line1\nline2\t\x07", false, None),
            "Session — note: line1 line2"
        );
    }

    #[test]
    fn editing_note_keeps_raw_text_and_appends_cursor() {
        assert_eq!(
            option_label_with_inline_note("Session", "spl", true, None),
            "Session — note: spl█"
        );
        // Even a blank note shows the joiner and cursor while editing.
        assert_eq!(
            option_label_with_inline_note("Session", "", true, None),
            "Session — note: █"
        );
    }

    #[test]
    fn degenerate_max_lengths() {
        assert_eq!(
            option_label_with_inline_note("Session", "note", false, Some(0)),
            ""
        );
        assert_eq!(
            option_label_with_inline_note("Session", "note", false, Some(1)),
            "…"
        );
    }

    #[test]
    fn idle_truncation_keeps_the_head() {
        let out = option_label_with_inline_note("Session", "a very long note body", false, Some(16));
        assert!(out.ends_with('…'));
        assert!(out.starts_with("Session"));
        assert!(UnicodeWidthStr::width(out.as_str()) <= 16);
    }

    #[test]
    fn editing_truncation_keeps_the_cursor() {
        let out = option_label_with_inline_note("Session", "a very long note body", true, Some(16));
        assert!(out.starts_with('…'));
        assert!(out.ends_with(EDIT_CURSOR));
        assert!(UnicodeWidthStr::width(out.as_str()) <= 16);
    }

    #[test]
    fn truncation_never_exceeds_the_cap() {
        for max_len in 0..24 {
            for editing in [false, true] {
                let out = option_label_with_inline_note(
                    "Session",
                    "note with some length",
                    editing,
                    Some(max_len),
                );
                assert!(
                    UnicodeWidthStr::width(out.as_str()) <= max_len,
                    "width {} exceeds cap {max_len} for editing={editing}",
                    UnicodeWidthStr::width(out.as_str()),
                );
            }
        }
    }

    #[test]
    fn long_label_alone_is_truncated_with_intact_head() {
        let out = option_label_with_inline_note(
            "An exceedingly descriptive option label",
            "note",
            false,
            Some(10),
        );
        assert_eq!(out, "An exceed…");
        assert!(UnicodeWidthStr::width(out.as_str()) <= 10);
    }

    #[test]
    fn wrapped_output_respects_width_and_keeps_cursor() {
        let lines =
            wrapped_option_label_with_inline_note("Session", "a note that wraps", true, 14, 2);
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 12);
        }
        let last = lines.last().map(String::as_str).unwrap_or_default();
        assert!(last.ends_with(EDIT_CURSOR));
    }

    #[test]
    fn wrapped_output_has_at_least_one_line_for_empty_input() {
        let lines = wrapped_option_label_with_inline_note("", "", false, 10, 0);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn wrap_padding_narrower_than_width_clamps_to_one_column() {
        let lines = wrapped_option_label_with_inline_note("ab", "", false, 2, 5);
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 1);
        }
    }
}
