//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, ScreenArgs};
use crate::error::Result;
use crate::predict::{HistoryEntry, Likelihood, Prediction};

/// Shown with every screening result.
pub const DISCLAIMER: &str = "This tool is for educational and awareness purposes only. \
It does not provide a medical diagnosis. Please consult a licensed pediatrician, \
psychologist, or developmental specialist for any concerns about autism.";

/// Result structure for one prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionReport {
    pub label: String,
    pub confidence: f64,
    pub probability: f64,
}

impl PredictionReport {
    /// Build a report from a pipeline outcome.
    pub fn from_prediction(prediction: &Prediction) -> Self {
        PredictionReport {
            label: label_sentence(prediction.likelihood).to_string(),
            confidence: prediction.confidence,
            probability: prediction.probability,
        }
    }
}

/// Result structure for artifact validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationReport {
    pub model_name: String,
    pub model_version: String,
    pub model_trees: usize,
    pub schema_columns: usize,
    pub scaler_columns: usize,
    pub consistent: bool,
}

/// One questionnaire entry in a schema report.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionReport {
    pub name: String,
    pub prompt: String,
    pub kind: String,
    pub choices: Vec<String>,
    pub asked_when: Option<String>,
}

/// Result structure for the schema command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaReport {
    pub questions: Vec<QuestionReport>,
    pub trained_columns: Vec<String>,
}

/// The full sentence for a likelihood label.
pub fn label_sentence(likelihood: Likelihood) -> &'static str {
    match likelihood {
        Likelihood::High => "High likelihood of autism",
        Likelihood::Low => "Low likelihood of autism",
    }
}

/// Output a result in the selected format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &ScreenArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &ScreenArgs) -> Result<()> {
    if args.verbosity() > 0 && !message.is_empty() {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print_value_human(&value, 0);
    Ok(())
}

fn print_value_human(value: &serde_json::Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        println!("{pad}{key}:");
                        print_value_human(val, indent + 1);
                    }
                    _ => println!("{pad}{key}: {}", scalar_to_string(val)),
                }
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                match item {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        print_value_human(item, indent + 1);
                    }
                    _ => println!("{pad}- {}", scalar_to_string(item)),
                }
            }
        }
        _ => println!("{pad}{}", scalar_to_string(value)),
    }
}

fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ScreenArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Print a screening result the way the form runtime shows it.
pub fn print_prediction_human(prediction: &Prediction) {
    println!(
        "{}. (Confidence: {:.2}%)",
        label_sentence(prediction.likelihood),
        prediction.confidence * 100.0
    );
    println!();
    println!("{DISCLAIMER}");
}

/// Print the session history table.
pub fn print_history_human(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No predictions this session.");
        return;
    }

    println!("Session history:");
    println!("════════════════");
    for (i, entry) in entries.iter().enumerate() {
        let answers = entry
            .answers
            .iter()
            .map(|(field, value)| format!("{field}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}. [{}] {} ({:.2}%) {answers}",
            i + 1,
            entry.timestamp.format("%H:%M:%S"),
            label_sentence(entry.likelihood),
            entry.confidence * 100.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_sentences() {
        assert_eq!(
            label_sentence(Likelihood::High),
            "High likelihood of autism"
        );
        assert_eq!(label_sentence(Likelihood::Low), "Low likelihood of autism");
    }

    #[test]
    fn test_prediction_report() {
        let prediction = Prediction {
            likelihood: Likelihood::High,
            confidence: 0.82,
            probability: 0.82,
        };

        let report = PredictionReport::from_prediction(&prediction);
        assert_eq!(report.label, "High likelihood of autism");
        assert_eq!(report.confidence, 0.82);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["label"], "High likelihood of autism");
    }
}
