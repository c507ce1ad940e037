//! The prediction pipeline: encode, align, scale, classify.

pub mod history;

// Re-export commonly used types
pub use history::{HistoryEntry, SessionHistory};

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::encoding::{encode_and_align, screening_table};
use crate::error::Result;
use crate::model::{RandomForest, StandardScaler};
use crate::schema::FeatureSchema;
use crate::survey::answer::SurveyResponse;

/// Classifier artifact file name inside an artifact directory.
pub const MODEL_FILE: &str = "model.json";
/// Scaler artifact file name inside an artifact directory.
pub const SCALER_FILE: &str = "scaler.json";
/// Feature schema artifact file name inside an artifact directory.
pub const SCHEMA_FILE: &str = "schema.json";

/// The screening outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Likelihood {
    /// The classifier predicted the positive class.
    High,
    /// The classifier predicted the negative class.
    Low,
}

impl std::fmt::Display for Likelihood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Likelihood::High => write!(f, "High likelihood"),
            Likelihood::Low => write!(f, "Low likelihood"),
        }
    }
}

/// The result of one screening request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Outcome label.
    pub likelihood: Likelihood,
    /// Confidence in the reported label: `p1` for High, `1 - p1` for Low.
    pub confidence: f64,
    /// Raw positive-class probability.
    pub probability: f64,
}

/// Runs the full pipeline against loaded artifacts.
///
/// Artifact loading happens once, before any request is served, and any
/// failure there is fatal. Per-request failures (unrecognized labels,
/// stale artifact pairings) are returned to the caller and the predictor
/// remains usable for further requests.
#[derive(Debug)]
pub struct Predictor {
    schema: FeatureSchema,
    scaler: StandardScaler,
    model: RandomForest,
}

impl Predictor {
    /// Assemble a predictor from already-loaded artifacts.
    pub fn new(schema: FeatureSchema, scaler: StandardScaler, model: RandomForest) -> Self {
        Predictor {
            schema,
            scaler,
            model,
        }
    }

    /// Load all three artifacts from a directory.
    ///
    /// Cross-artifact consistency is deliberately not checked here: a
    /// stale schema/model pairing surfaces per-request as a prediction
    /// failure, matching the source system's behavior.
    pub fn load(dir: &Path) -> Result<Self> {
        let schema = FeatureSchema::load(&dir.join(SCHEMA_FILE))?;
        let scaler = StandardScaler::load(&dir.join(SCALER_FILE))?;
        let model = RandomForest::load(&dir.join(MODEL_FILE))?;

        info!(
            "loaded artifacts from {}: {} v{}, {} trees, {} columns",
            dir.display(),
            model.metadata().name,
            model.metadata().version,
            model.num_trees(),
            schema.len()
        );

        Ok(Predictor::new(schema, scaler, model))
    }

    /// The trained feature schema.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The classifier artifact.
    pub fn model(&self) -> &RandomForest {
        &self.model
    }

    /// The scaler artifact.
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Run one screening request through the full pipeline.
    pub fn predict(&self, response: &SurveyResponse) -> Result<Prediction> {
        let vector = encode_and_align(response, screening_table(), &self.schema)?;
        let scaled = self.scaler.transform(&vector)?;
        let proba = self.model.predict_proba(&scaled)?;

        let probability = proba[1];
        let (likelihood, confidence) = if probability >= 0.5 {
            (Likelihood::High, probability)
        } else {
            (Likelihood::Low, 1.0 - probability)
        };

        Ok(Prediction {
            likelihood,
            confidence,
            probability,
        })
    }
}
