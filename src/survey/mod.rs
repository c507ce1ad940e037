//! Survey module: raw answers and the questionnaire definition.
//!
//! This module provides the raw answer types collected per screening
//! request and the static questionnaire that declares every survey field.

pub mod answer;
pub mod questionnaire;

// Re-export commonly used types
pub use answer::{AnswerValue, SurveyResponse, SurveyResponseBuilder};
pub use questionnaire::{FieldKind, FieldSpec, Gate, field_spec, questionnaire};
