use std::collections::HashSet;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Label of the synthetic free-text option appended to every question.
///
/// Reserved: callers must never supply an option with this label. The widget
/// itself appends it as the last option of each question.
pub const OTHER_LABEL: &str = "Other (type your own)";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
pub struct QuestionOption {
    pub label: String,
}

impl QuestionOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
pub struct Question {
    /// Unique within one tool call; used as the transcript summary key.
    pub id: String,
    pub question: String,
    /// Order is significant and preserved throughout.
    pub options: Vec<QuestionOption>,
    /// Allow selecting any subset of options rather than exactly one.
    #[serde(default)]
    pub multi: bool,
    /// Index of the suggested default option, if any. Out-of-range values
    /// are tolerated and ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
pub struct AskArgs {
    pub questions: Vec<Question>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AskArgsError {
    #[error("question `{id}` has no options")]
    EmptyOptions { id: String },
    #[error("question `{id}` uses the reserved option label `{OTHER_LABEL}`")]
    ReservedLabel { id: String },
    #[error("duplicate question id `{id}`")]
    DuplicateId { id: String },
}

impl AskArgs {
    /// Structural validation of caller input. The empty-questions case is
    /// not an error here; the tool boundary reports it as a diagnostic.
    pub fn validate(&self) -> Result<(), AskArgsError> {
        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(AskArgsError::DuplicateId {
                    id: question.id.clone(),
                });
            }
            if question.options.is_empty() {
                return Err(AskArgsError::EmptyOptions {
                    id: question.id.clone(),
                });
            }
            if question
                .options
                .iter()
                .any(|option| option.label == OTHER_LABEL)
            {
                return Err(AskArgsError::ReservedLabel {
                    id: question.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Canonical outcome of answering one question.
///
/// `custom_input` is set only when the synthetic "Other" option was chosen
/// with a non-empty note; `selected_options` never contains the reserved
/// label or a "(Recommended)" tag.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
pub struct Selection {
    #[serde(rename = "selectedOptions", default)]
    pub selected_options: Vec<String>,
    #[serde(rename = "customInput", skip_serializing_if = "Option::is_none")]
    pub custom_input: Option<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.selected_options.is_empty() && self.custom_input.is_none()
    }
}

/// Per-question entry of the structured details payload.
///
/// Carries the original, unsanitized text; display-safe text lives in the
/// transcript only.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
pub struct QuestionResult {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub multi: bool,
    #[serde(rename = "selectedOptions")]
    pub selected_options: Vec<String>,
    #[serde(rename = "customInput", skip_serializing_if = "Option::is_none")]
    pub custom_input: Option<String>,
}

/// Structured details returned alongside the transcript. Single-question
/// calls flatten the one result; multi-question calls wrap them in
/// `results`; diagnostics carry no details at all.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum AskDetails {
    Single(QuestionResult),
    Multi { results: Vec<QuestionResult> },
    Empty {},
}

impl Default for AskDetails {
    fn default() -> Self {
        AskDetails::Empty {}
    }
}

/// Boundary artifact handed back to the host.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
pub struct ToolOutput {
    pub content: String,
    pub details: AskDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            question: "Pick one.".to_string(),
            options: vec![QuestionOption::new("JWT"), QuestionOption::new("Session")],
            multi: false,
            recommended: None,
        }
    }

    #[test]
    fn selection_serializes_with_camel_case_keys() {
        let selection = Selection {
            selected_options: vec!["JWT".to_string()],
            custom_input: Some("org-sso".to_string()),
        };
        let json = serde_json::to_value(&selection).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "selectedOptions": ["JWT"],
                "customInput": "org-sso",
            })
        );
    }

    #[test]
    fn selection_omits_absent_custom_input() {
        let selection = Selection {
            selected_options: vec![],
            custom_input: None,
        };
        let json = serde_json::to_string(&selection).expect("serialize");
        assert_eq!(json, r#"{"selectedOptions":[]}"#);
    }

    #[test]
    fn multi_defaults_to_false_on_deserialize() {
        let parsed: Question = serde_json::from_value(serde_json::json!({
            "id": "auth",
            "question": "Pick one.",
            "options": [{"label": "JWT"}],
        }))
        .expect("deserialize");
        assert!(!parsed.multi);
        assert_eq!(parsed.recommended, None);
    }

    #[test]
    fn validate_rejects_reserved_label() {
        let mut q = question("auth");
        q.options.push(QuestionOption::new(OTHER_LABEL));
        let args = AskArgs { questions: vec![q] };
        assert_eq!(
            args.validate(),
            Err(AskArgsError::ReservedLabel {
                id: "auth".to_string()
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let args = AskArgs {
            questions: vec![question("auth"), question("auth")],
        };
        assert_eq!(
            args.validate(),
            Err(AskArgsError::DuplicateId {
                id: "auth".to_string()
            })
        );
    }

    #[test]
    fn validate_rejects_empty_option_list() {
        let mut q = question("cache");
        q.options.clear();
        let args = AskArgs { questions: vec![q] };
        assert_eq!(
            args.validate(),
            Err(AskArgsError::EmptyOptions {
                id: "cache".to_string()
            })
        );
    }

    #[test]
    fn empty_details_serialize_as_empty_object() {
        let output = ToolOutput {
            content: "ask tool requires interactive mode".to_string(),
            details: AskDetails::default(),
        };
        let json = serde_json::to_value(&output).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "content": "ask tool requires interactive mode",
                "details": {},
            })
        );
    }

    #[test]
    fn details_round_trip_distinguishes_single_and_multi() {
        let single = AskDetails::Single(QuestionResult {
            id: "auth".to_string(),
            question: "Pick one.".to_string(),
            options: vec!["JWT".to_string()],
            multi: false,
            selected_options: vec!["JWT".to_string()],
            custom_input: None,
        });
        let json = serde_json::to_string(&single).expect("serialize");
        let parsed: AskDetails = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, single);

        let multi = AskDetails::Multi { results: vec![] };
        let json = serde_json::to_string(&multi).expect("serialize");
        let parsed: AskDetails = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, multi);
    }
}
