//! The static questionnaire: every survey field, in form order.
//!
//! This is the Rust counterpart of the original form's widget declarations:
//! field names, kinds, allowed choices, numeric ranges and defaults, plus
//! the single ask-when gate. Collection-time validation lives here; the
//! encoder performs no range validation of its own.

use lazy_static::lazy_static;

use crate::error::{Result, ScreenError};
use crate::survey::answer::{AnswerValue, SurveyResponse};

/// The kind of a survey field, with its collection-time constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A label drawn from a fixed choice list.
    Categorical { choices: &'static [&'static str] },
    /// A Yes/No question.
    Binary,
    /// A numeric answer within an inclusive range.
    Numeric { min: i64, max: i64, default: i64 },
}

/// A gate deciding whether a field is solicited at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    /// The prerequisite field.
    pub field: &'static str,
    /// The answer the prerequisite must have for this field to be asked.
    pub answer: &'static str,
}

/// Declaration of one survey field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name, as used in responses and the encoding table.
    pub name: &'static str,
    /// Prompt shown by the interactive session.
    pub prompt: &'static str,
    /// Field kind and constraints.
    pub kind: FieldKind,
    /// When set, the field is only solicited if the gate holds.
    pub asked_when: Option<Gate>,
}

impl FieldSpec {
    /// Validate a collected answer against this field's constraints.
    ///
    /// Categorical and binary answers must match a choice exactly (no case
    /// folding); numeric answers must lie within the declared range.
    pub fn validate(&self, answer: &AnswerValue) -> Result<()> {
        match &self.kind {
            FieldKind::Categorical { choices } => {
                let label = answer.as_text().ok_or_else(|| {
                    ScreenError::answer(format!("field '{}' expects a label", self.name))
                })?;
                if !choices.contains(&label) {
                    return Err(ScreenError::answer(format!(
                        "'{label}' is not a choice for field '{}'",
                        self.name
                    )));
                }
                Ok(())
            }
            FieldKind::Binary => {
                let label = answer.as_text().ok_or_else(|| {
                    ScreenError::answer(format!("field '{}' expects a label", self.name))
                })?;
                if label != "Yes" && label != "No" {
                    return Err(ScreenError::answer(format!(
                        "field '{}' expects Yes or No, got '{label}'",
                        self.name
                    )));
                }
                Ok(())
            }
            FieldKind::Numeric { min, max, .. } => {
                let value = answer.as_f64().ok_or_else(|| {
                    ScreenError::answer(format!("field '{}' expects a number", self.name))
                })?;
                if value < *min as f64 || value > *max as f64 {
                    return Err(ScreenError::answer(format!(
                        "field '{}' must be between {min} and {max}",
                        self.name
                    )));
                }
                Ok(())
            }
        }
    }

    /// Whether this field should be solicited given the answers so far.
    pub fn is_asked(&self, so_far: &SurveyResponse) -> bool {
        match &self.asked_when {
            None => true,
            Some(gate) => so_far
                .get(gate.field)
                .and_then(|a| a.as_text())
                .map(|label| label == gate.answer)
                .unwrap_or(false),
        }
    }
}

lazy_static! {
    /// All survey fields, in the order the form presents them.
    static ref QUESTIONNAIRE: Vec<FieldSpec> = vec![
        FieldSpec {
            name: "Age",
            prompt: "Age of child (in years)",
            kind: FieldKind::Numeric { min: 0, max: 17, default: 5 },
            asked_when: None,
        },
        FieldSpec {
            name: "Sex",
            prompt: "Sex",
            kind: FieldKind::Categorical { choices: &["Male", "Female"] },
            asked_when: None,
        },
        FieldSpec {
            name: "Race",
            prompt: "Race/ethnicity",
            kind: FieldKind::Categorical {
                choices: &["White", "Black", "Hispanic", "Asian", "Other"],
            },
            asked_when: None,
        },
        FieldSpec {
            name: "Home_Language",
            prompt: "Primary home language",
            kind: FieldKind::Categorical { choices: &["English", "Non-English"] },
            asked_when: None,
        },
        FieldSpec {
            name: "Parental_Education",
            prompt: "Highest parental education",
            kind: FieldKind::Categorical {
                choices: &[
                    "Less than high school",
                    "High school",
                    "Some college",
                    "College or more",
                ],
            },
            asked_when: None,
        },
        FieldSpec {
            name: "Sleep_Hours",
            prompt: "Average sleep hours per night",
            kind: FieldKind::Numeric { min: 0, max: 14, default: 9 },
            asked_when: None,
        },
        FieldSpec {
            name: "Screen_Time_Hours",
            prompt: "Average screen time per day (hours)",
            kind: FieldKind::Numeric { min: 0, max: 10, default: 2 },
            asked_when: None,
        },
        FieldSpec {
            name: "Premature_Birth",
            prompt: "Was the child born prematurely?",
            kind: FieldKind::Binary,
            asked_when: None,
        },
        FieldSpec {
            name: "Low_Birthweight",
            prompt: "Did the child have a low birthweight?",
            kind: FieldKind::Binary,
            asked_when: Some(Gate { field: "Premature_Birth", answer: "Yes" }),
        },
        FieldSpec {
            name: "Speech_Concern",
            prompt: "Concern: Speech delay?",
            kind: FieldKind::Binary,
            asked_when: None,
        },
        FieldSpec {
            name: "Interaction_Concern",
            prompt: "Concern: Social interaction?",
            kind: FieldKind::Binary,
            asked_when: None,
        },
        FieldSpec {
            name: "WordPhrase_Concern",
            prompt: "Concern: Use of words/phrases?",
            kind: FieldKind::Binary,
            asked_when: None,
        },
        FieldSpec {
            name: "Maternal_Mental_Health",
            prompt: "Maternal mental health",
            kind: FieldKind::Categorical { choices: &["Good", "Average", "Poor"] },
            asked_when: None,
        },
    ];
}

/// Get the full questionnaire, in form order.
pub fn questionnaire() -> &'static [FieldSpec] {
    &QUESTIONNAIRE
}

/// Look up a field by name.
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    QUESTIONNAIRE.iter().find(|f| f.name == name)
}
