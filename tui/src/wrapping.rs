//! Display-width-aware soft wrapping.
//!
//! Thin wrapper over `textwrap` that always yields at least one line and
//! never produces a line wider than the requested column count (double-width
//! characters included — `textwrap` measures with `unicode-width`).

use textwrap::Options;

/// Wrap `text` to `width` columns, returning owned lines.
///
/// A zero width is treated as one column. Empty input yields a single empty
/// line so callers can rely on a non-empty result.
pub(crate) fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let options = Options::new(width.max(1)).break_words(true);
    let lines: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn empty_input_yields_one_empty_line() {
        assert_eq!(word_wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(word_wrap("alpha beta gamma", 10), vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn breaks_words_longer_than_the_width() {
        let lines = word_wrap("abcdefghij", 4);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 4);
        }
    }

    #[test]
    fn measures_double_width_characters() {
        // Each CJK character is two columns wide.
        let lines = word_wrap("你好世界", 4);
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 4);
        }
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn zero_width_is_clamped_to_one_column() {
        let lines = word_wrap("ab", 0);
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 1);
        }
    }
}
