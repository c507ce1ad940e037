//! Raw survey answers collected per screening request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenError};

/// A single raw answer as collected from the form runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A human-readable label ("Male", "Yes", "Some college", ...)
    Text(String),
    /// An integer answer (age, hours)
    Integer(i64),
    /// A fractional answer
    Float(f64),
}

impl AnswerValue {
    /// Get the answer as a text label, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the answer as a number, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnswerValue::Integer(i) => Some(*i as f64),
            AnswerValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Text(s) => write!(f, "{s}"),
            AnswerValue::Integer(i) => write!(f, "{i}"),
            AnswerValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<i64> for AnswerValue {
    fn from(i: i64) -> Self {
        AnswerValue::Integer(i)
    }
}

impl From<f64> for AnswerValue {
    fn from(f: f64) -> Self {
        AnswerValue::Float(f)
    }
}

/// A set of raw answers for one screening request.
///
/// Responses are produced fresh per prediction request and discarded after
/// use; they are never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyResponse {
    /// The collected answers, keyed by field name.
    answers: HashMap<String, AnswerValue>,
}

impl SurveyResponse {
    /// Create a new empty response.
    pub fn new() -> Self {
        SurveyResponse {
            answers: HashMap::new(),
        }
    }

    /// Set an answer, replacing any previous value for the field.
    pub fn set<S: Into<String>>(&mut self, field: S, value: AnswerValue) {
        self.answers.insert(field.into(), value);
    }

    /// Get the answer for a field.
    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.answers.get(field)
    }

    /// Check whether a field has been answered.
    pub fn has_answer(&self, field: &str) -> bool {
        self.answers.contains_key(field)
    }

    /// Get all answered field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.answers.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Check if the response is empty.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Parse a response from a JSON answers object.
    ///
    /// Strings become text labels, numbers become integer or float answers.
    /// Any other JSON value is rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            ScreenError::answer("answers file must contain a JSON object")
        })?;

        let mut response = SurveyResponse::new();
        for (field, raw) in obj {
            let answer = match raw {
                serde_json::Value::String(s) => AnswerValue::Text(s.clone()),
                serde_json::Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        AnswerValue::Integer(i)
                    } else if let Some(f) = n.as_f64() {
                        AnswerValue::Float(f)
                    } else {
                        return Err(ScreenError::answer(format!(
                            "field '{field}' has an unrepresentable number"
                        )));
                    }
                }
                _ => {
                    return Err(ScreenError::answer(format!(
                        "field '{field}' must be a string or a number"
                    )));
                }
            };
            response.set(field.clone(), answer);
        }

        Ok(response)
    }

    /// Create a builder for constructing responses.
    pub fn builder() -> SurveyResponseBuilder {
        SurveyResponseBuilder::new()
    }
}

/// A builder for constructing survey responses in a fluent manner.
#[derive(Debug, Default)]
pub struct SurveyResponseBuilder {
    response: SurveyResponse,
}

impl SurveyResponseBuilder {
    /// Create a new response builder.
    pub fn new() -> Self {
        SurveyResponseBuilder {
            response: SurveyResponse::new(),
        }
    }

    /// Add a text answer.
    pub fn text<S: Into<String>, T: Into<String>>(mut self, field: S, value: T) -> Self {
        self.response
            .set(field, AnswerValue::Text(value.into()));
        self
    }

    /// Add an integer answer.
    pub fn integer<S: Into<String>>(mut self, field: S, value: i64) -> Self {
        self.response.set(field, AnswerValue::Integer(value));
        self
    }

    /// Add a float answer.
    pub fn float<S: Into<String>>(mut self, field: S, value: f64) -> Self {
        self.response.set(field, AnswerValue::Float(value));
        self
    }

    /// Add an answer with a generic value.
    pub fn answer<S: Into<String>>(mut self, field: S, value: AnswerValue) -> Self {
        self.response.set(field, value);
        self
    }

    /// Build the final response.
    pub fn build(self) -> SurveyResponse {
        self.response
    }
}
