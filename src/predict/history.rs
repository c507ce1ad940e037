//! In-memory session history of predictions.

use serde::{Deserialize, Serialize};

use crate::predict::{Likelihood, Prediction};
use crate::survey::answer::SurveyResponse;

/// Answer fields kept in a history entry.
///
/// The session log shows a small display subset, not the full response.
const SUMMARY_FIELDS: [&str; 5] = [
    "Age",
    "Sex",
    "Speech_Concern",
    "Interaction_Concern",
    "WordPhrase_Concern",
];

/// One logged prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the prediction was made.
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Display subset of the raw answers, in summary order.
    pub answers: Vec<(String, String)>,
    /// Outcome label.
    pub likelihood: Likelihood,
    /// Confidence in the reported label.
    pub confidence: f64,
}

impl HistoryEntry {
    /// Build an entry from a request and its outcome, stamped now.
    pub fn record(response: &SurveyResponse, prediction: &Prediction) -> Self {
        let answers = SUMMARY_FIELDS
            .iter()
            .filter_map(|field| {
                response
                    .get(field)
                    .map(|answer| (field.to_string(), answer.to_string()))
            })
            .collect();

        HistoryEntry {
            timestamp: chrono::Utc::now(),
            answers,
            likelihood: prediction.likelihood,
            confidence: prediction.confidence,
        }
    }
}

/// Append-only log of the predictions made during one process lifetime.
///
/// There is no eviction and no persistence across restarts. The hosting
/// runtime is single-threaded with one request in flight at a time, so the
/// log needs no locking.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        SessionHistory {
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The number of logged predictions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if anything has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
