//! Option model and selection normalization.
//!
//! Internally every option carries explicit `is_other` / `is_recommended`
//! flags; the decorated strings ("(Recommended)" suffix, reserved "Other"
//! label) exist only at the presentation boundary, produced and consumed by
//! the functions in this module.

use std::collections::HashMap;

use askpane_protocol::Question;
use askpane_protocol::Selection;

pub use askpane_protocol::OTHER_LABEL;

/// Display decoration appended to the recommended option's label.
pub const RECOMMENDED_SUFFIX: &str = " (Recommended)";

/// Separator between an option value and its inline note in a `Selection`.
const NOTE_SEPARATOR: &str = " - ";

/// One selectable row as the session sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionItem {
    pub label: String,
    pub is_other: bool,
    pub is_recommended: bool,
}

/// A question's options plus the synthetic "Other" row, in display order.
#[derive(Debug, Clone)]
pub(crate) struct OptionList {
    items: Vec<OptionItem>,
}

impl OptionList {
    pub(crate) fn new(question: &Question) -> Self {
        let recommended = question
            .recommended
            .filter(|idx| *idx < question.options.len());
        let mut items: Vec<OptionItem> = question
            .options
            .iter()
            .enumerate()
            .map(|(idx, option)| OptionItem {
                label: option.label.clone(),
                is_other: false,
                is_recommended: recommended == Some(idx),
            })
            .collect();
        items.push(OptionItem {
            label: OTHER_LABEL.to_string(),
            is_other: true,
            is_recommended: false,
        });
        Self { items }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Index of the synthetic "Other" row, always the last option.
    pub(crate) fn other_index(&self) -> usize {
        self.items.len() - 1
    }

    pub(crate) fn is_other(&self, idx: usize) -> bool {
        self.items.get(idx).is_some_and(|item| item.is_other)
    }

    /// Initial cursor position: the recommended option, or the first.
    pub(crate) fn initial_cursor(&self) -> usize {
        self.items
            .iter()
            .position(|item| item.is_recommended)
            .unwrap_or(0)
    }

    /// Label as shown to the user, recommended tag included.
    pub(crate) fn display_label(&self, idx: usize) -> String {
        match self.items.get(idx) {
            Some(item) if item.is_recommended => {
                format!("{}{RECOMMENDED_SUFFIX}", item.label)
            }
            Some(item) => item.label.clone(),
            None => String::new(),
        }
    }

    /// All display labels in order, for the selection builders.
    pub(crate) fn display_labels(&self) -> Vec<String> {
        (0..self.items.len())
            .map(|idx| self.display_label(idx))
            .collect()
    }

    pub(crate) fn clamp(&self, idx: usize) -> usize {
        idx.min(self.items.len().saturating_sub(1))
    }
}

/// Append the recommended tag to the label at `recommended`, if in range.
/// Idempotent: a label that already carries the tag is left alone.
pub fn append_recommended_tag(labels: &[String], recommended: Option<usize>) -> Vec<String> {
    let mut labels = labels.to_vec();
    if let Some(idx) = recommended
        && let Some(label) = labels.get_mut(idx)
        && !label.ends_with(RECOMMENDED_SUFFIX)
    {
        label.push_str(RECOMMENDED_SUFFIX);
    }
    labels
}

/// Remove the recommended tag if present; identity otherwise.
pub fn strip_recommended_tag(label: &str) -> &str {
    label.strip_suffix(RECOMMENDED_SUFFIX).unwrap_or(label)
}

/// Collapse one answered single-select question into a `Selection`.
///
/// The reserved "Other" label routes the note into `custom_input`; any other
/// label lands in `selected_options`, joined with its note when one exists.
pub fn build_single_selection(selected_label: &str, note: &str) -> Selection {
    let label = strip_recommended_tag(selected_label);
    let note = note.trim();
    if label == OTHER_LABEL {
        return Selection {
            selected_options: Vec::new(),
            custom_input: (!note.is_empty()).then(|| note.to_string()),
        };
    }
    let value = if note.is_empty() {
        label.to_string()
    } else {
        format!("{label}{NOTE_SEPARATOR}{note}")
    };
    Selection {
        selected_options: vec![value],
        custom_input: None,
    }
}

/// Collapse one answered multi-select question into a `Selection`.
///
/// Output follows option-list order, never click order. Indexes outside the
/// option list are ignored. The entry at `other_index`, if selected, never
/// reaches `selected_options`; its note (when non-empty) becomes
/// `custom_input`.
pub fn build_multi_selection(
    option_labels: &[String],
    selected_indexes: &[usize],
    notes_by_index: &HashMap<usize, String>,
    other_index: usize,
) -> Selection {
    let mut selected_options = Vec::new();
    let mut custom_input = None;
    for (idx, label) in option_labels.iter().enumerate() {
        if !selected_indexes.contains(&idx) {
            continue;
        }
        let note = notes_by_index
            .get(&idx)
            .map(|note| note.trim())
            .unwrap_or_default();
        if idx == other_index {
            if !note.is_empty() {
                custom_input = Some(note.to_string());
            }
            continue;
        }
        let label = strip_recommended_tag(label);
        if note.is_empty() {
            selected_options.push(label.to_string());
        } else {
            selected_options.push(format!("{label}{NOTE_SEPARATOR}{note}"));
        }
    }
    Selection {
        selected_options,
        custom_input,
    }
}
