//! Standard scaler loaded from a JSON artifact.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenError};

/// A fitted standardization scaler: `(x - mean) / scale` per column.
///
/// The mean and scale arrays are fitted during the external training
/// process; their order follows the trained feature schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler from fitted per-column statistics.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.is_empty() {
            return Err(ScreenError::artifact("scaler has no columns"));
        }
        if mean.len() != scale.len() {
            return Err(ScreenError::artifact(format!(
                "scaler mean/scale length mismatch: {} vs {}",
                mean.len(),
                scale.len()
            )));
        }
        if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ScreenError::artifact(
                "scaler has a zero or non-finite scale entry",
            ));
        }
        Ok(StandardScaler { mean, scale })
    }

    /// Load a scaler artifact, validating its structure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScreenError::artifact(format!("cannot read scaler {}: {e}", path.display()))
        })?;

        let scaler: StandardScaler = serde_json::from_str(&content).map_err(|e| {
            ScreenError::artifact(format!("cannot parse scaler {}: {e}", path.display()))
        })?;

        Self::new(scaler.mean, scaler.scale)
    }

    /// Save the scaler as a JSON artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Standardize one feature row.
    ///
    /// The row length must match the fitted statistics; a mismatch is a
    /// per-request prediction failure (stale schema/scaler pairing), not an
    /// artifact failure.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.mean.len() {
            return Err(ScreenError::prediction(format!(
                "scaler fitted on {} columns but the row has {}",
                self.mean.len(),
                row.len()
            )));
        }

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }

    /// The number of fitted columns.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// A fitted scaler is never empty; this exists for completeness.
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}
