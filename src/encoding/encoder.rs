//! Encoding and alignment of survey responses into feature vectors.

use std::collections::HashMap;

use log::debug;

use crate::encoding::table::{EncodingTable, FieldEncoding};
use crate::error::{Result, ScreenError};
use crate::schema::FeatureSchema;
use crate::survey::answer::SurveyResponse;

/// Encode a response into a column → value mapping.
///
/// Categorical answers go through the table (unrecognized labels fail),
/// binary answers through the lenient Yes→1/other→0 rule, numeric answers
/// pass through unchanged. Gated fields are forced to their default answer
/// when the prerequisite does not hold, whether or not a raw answer was
/// supplied. Response fields the table does not know are dropped.
pub fn encode(
    response: &SurveyResponse,
    table: &EncodingTable,
) -> Result<HashMap<String, f64>> {
    let mut encoded = HashMap::new();

    for (field, field_encoding) in table.fields() {
        match field_encoding {
            FieldEncoding::Categorical { column, .. } => {
                if let Some(answer) = response.get(field) {
                    let label = answer.as_text().ok_or_else(|| {
                        ScreenError::encoding(format!("field '{field}' expects a label"))
                    })?;
                    let code = table.encode_categorical(field, label)?;
                    encoded.insert(column.to_string(), code as f64);
                }
            }
            FieldEncoding::Binary { column, gate } => {
                let gate_holds = match gate {
                    Some(gate) => response
                        .get(gate.field)
                        .and_then(|a| a.as_text())
                        .map(|label| label == gate.required)
                        .unwrap_or(false),
                    None => true,
                };

                if let Some(gate) = gate
                    && !gate_holds
                {
                    // The dependent answer is never solicited here; encode
                    // as if the default had been answered.
                    let code = EncodingTable::encode_binary(gate.default);
                    encoded.insert(column.to_string(), code as f64);
                } else if let Some(answer) = response.get(field) {
                    let label = answer.as_text().unwrap_or("");
                    let code = EncodingTable::encode_binary(label);
                    encoded.insert(column.to_string(), code as f64);
                }
            }
            FieldEncoding::Numeric { column } => {
                if let Some(answer) = response.get(field) {
                    let value = answer.as_f64().ok_or_else(|| {
                        ScreenError::encoding(format!(
                            "field '{field}' expects a numeric answer"
                        ))
                    })?;
                    encoded.insert(column.to_string(), value);
                }
            }
        }
    }

    for field in response.field_names() {
        if table.encoding_for(field).is_none() {
            debug!("dropping answer for unknown field '{field}'");
        }
    }

    Ok(encoded)
}

/// Select and order encoded values by the trained column order.
///
/// Columns absent from the encoded mapping become 0; encoded columns the
/// schema does not name are dropped. Neither case is an error.
pub fn align(encoded: &HashMap<String, f64>, schema: &FeatureSchema) -> Vec<f64> {
    schema
        .columns()
        .iter()
        .map(|column| match encoded.get(column) {
            Some(value) => *value,
            None => {
                debug!("schema column '{column}' missing from encoded data, defaulting to 0");
                0.0
            }
        })
        .collect()
}

/// Encode a response and align it to the trained column order.
///
/// Pure: identical inputs yield bit-identical vectors. The output length
/// always equals the schema length.
pub fn encode_and_align(
    response: &SurveyResponse,
    table: &EncodingTable,
    schema: &FeatureSchema,
) -> Result<Vec<f64>> {
    let encoded = encode(response, table)?;
    Ok(align(&encoded, schema))
}
