//! Static categorical-to-integer encoding tables.
//!
//! The table mirrors the label maps the classifier was trained with. It is
//! built once at process start and never written afterwards. Invariant:
//! every label a response may legally carry for a categorical field appears
//! in its map; looking up anything else is an [`Encoding`] failure.
//!
//! [`Encoding`]: crate::error::ScreenError::Encoding

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::{Result, ScreenError};

/// Forces a dependent field to a fixed answer when its prerequisite does
/// not hold.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryGate {
    /// The prerequisite field.
    pub field: &'static str,
    /// The answer the prerequisite must have for the raw value to be used.
    pub required: &'static str,
    /// The answer substituted when the prerequisite does not hold.
    pub default: &'static str,
}

/// How one survey field is turned into a numeric feature column.
#[derive(Debug, Clone)]
pub enum FieldEncoding {
    /// Table lookup against a fixed label map.
    Categorical {
        /// Output column name in the trained schema.
        column: &'static str,
        /// Allowed labels and their integer codes.
        labels: HashMap<&'static str, i64>,
    },
    /// The generic Yes→1/other→0 rule.
    Binary {
        /// Output column name in the trained schema.
        column: &'static str,
        /// Optional cross-field dependency applied before encoding.
        gate: Option<BinaryGate>,
    },
    /// Raw numeric passthrough, no range validation.
    Numeric {
        /// Output column name in the trained schema.
        column: &'static str,
    },
}

impl FieldEncoding {
    /// The output column this field encodes into.
    pub fn column(&self) -> &'static str {
        match self {
            FieldEncoding::Categorical { column, .. } => column,
            FieldEncoding::Binary { column, .. } => column,
            FieldEncoding::Numeric { column } => column,
        }
    }
}

/// The per-field encoding rules for the screening questionnaire.
#[derive(Debug, Clone)]
pub struct EncodingTable {
    /// Field name → encoding rule, in questionnaire order.
    fields: Vec<(&'static str, FieldEncoding)>,
}

impl EncodingTable {
    /// Build the screening table.
    ///
    /// Label codes must match the training pipeline's preprocessing
    /// exactly; they are part of the model contract, not a free choice.
    pub fn screening() -> Self {
        let fields = vec![
            (
                "Age",
                FieldEncoding::Numeric { column: "Age" },
            ),
            (
                "Sex",
                FieldEncoding::Categorical {
                    column: "Sex_Label",
                    labels: HashMap::from([("Male", 1), ("Female", 0)]),
                },
            ),
            (
                "Race",
                FieldEncoding::Categorical {
                    column: "Race_Label",
                    labels: HashMap::from([
                        ("White", 0),
                        ("Black", 1),
                        ("Hispanic", 2),
                        ("Asian", 3),
                        ("Other", 4),
                    ]),
                },
            ),
            (
                "Home_Language",
                FieldEncoding::Categorical {
                    column: "Home_Language_Label",
                    labels: HashMap::from([("English", 0), ("Non-English", 1)]),
                },
            ),
            (
                "Parental_Education",
                FieldEncoding::Categorical {
                    column: "Parental_Education_Label",
                    labels: HashMap::from([
                        ("Less than high school", 0),
                        ("High school", 1),
                        ("Some college", 2),
                        ("College or more", 3),
                    ]),
                },
            ),
            (
                "Sleep_Hours",
                FieldEncoding::Numeric { column: "Sleep_Hours" },
            ),
            (
                "Screen_Time_Hours",
                FieldEncoding::Numeric { column: "Screen_Time_Hours" },
            ),
            (
                "Premature_Birth",
                FieldEncoding::Binary { column: "Premature_Birth", gate: None },
            ),
            (
                "Low_Birthweight",
                FieldEncoding::Binary {
                    column: "Low_Birthweight",
                    gate: Some(BinaryGate {
                        field: "Premature_Birth",
                        required: "Yes",
                        default: "No",
                    }),
                },
            ),
            (
                "Speech_Concern",
                FieldEncoding::Binary { column: "Speech_Concern", gate: None },
            ),
            (
                "Interaction_Concern",
                FieldEncoding::Binary { column: "Interaction_Concern", gate: None },
            ),
            (
                "WordPhrase_Concern",
                FieldEncoding::Binary { column: "WordPhrase_Concern", gate: None },
            ),
            (
                "Maternal_Mental_Health",
                FieldEncoding::Categorical {
                    column: "Maternal_Mental_Health_Label",
                    labels: HashMap::from([("Good", 0), ("Average", 1), ("Poor", 2)]),
                },
            ),
        ];

        EncodingTable { fields }
    }

    /// All fields and their encodings, in questionnaire order.
    pub fn fields(&self) -> &[(&'static str, FieldEncoding)] {
        &self.fields
    }

    /// Look up the encoding for a field.
    pub fn encoding_for(&self, field: &str) -> Option<&FieldEncoding> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, enc)| enc)
    }

    /// Encode a categorical label for a field.
    ///
    /// The lookup is exact: no normalization, no case folding.
    pub fn encode_categorical(&self, field: &str, label: &str) -> Result<i64> {
        match self.encoding_for(field) {
            Some(FieldEncoding::Categorical { labels, .. }) => {
                labels.get(label).copied().ok_or_else(|| {
                    ScreenError::encoding(format!(
                        "'{label}' is not a recognized answer for field '{field}'"
                    ))
                })
            }
            _ => Err(ScreenError::encoding(format!(
                "field '{field}' is not a categorical field"
            ))),
        }
    }

    /// Encode a binary answer: "Yes" → 1, anything else → 0.
    ///
    /// This is lenient on purpose: the original system encoded every
    /// non-"Yes" string (typos and case variants included) as 0.
    pub fn encode_binary(label: &str) -> i64 {
        if label == "Yes" { 1 } else { 0 }
    }
}

lazy_static! {
    static ref SCREENING_TABLE: EncodingTable = EncodingTable::screening();
}

/// The process-wide screening table, shared read-only across requests.
pub fn screening_table() -> &'static EncodingTable {
    &SCREENING_TABLE
}
