//! The trained feature schema: ordered model input columns.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenError};

/// The ordered list of feature column names the classifier was trained on.
///
/// The schema defines both the set of expected model inputs and their
/// required order. It is persisted as a plain JSON array of strings by the
/// training pipeline and loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from an ordered column list.
    ///
    /// The list must be non-empty and duplicate-free.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ScreenError::artifact("feature schema has no columns"));
        }
        for (i, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(ScreenError::artifact("feature schema has an empty column name"));
            }
            if columns[..i].contains(column) {
                return Err(ScreenError::artifact(format!(
                    "feature schema has duplicate column '{column}'"
                )));
            }
        }
        Ok(FeatureSchema { columns })
    }

    /// Load a schema from a JSON artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScreenError::artifact(format!("cannot read schema {}: {e}", path.display()))
        })?;

        let columns: Vec<String> = serde_json::from_str(&content).map_err(|e| {
            ScreenError::artifact(format!("cannot parse schema {}: {e}", path.display()))
        })?;

        Self::new(columns)
    }

    /// Save the schema as a JSON artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.columns)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The columns, in trained order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The position of a column, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Check whether the schema names a column.
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// The number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// A schema is never empty; this exists for completeness.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_schema_creation() {
        let schema = FeatureSchema::new(columns(&["Age", "Sex_Label"])).unwrap();

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.position("Age"), Some(0));
        assert_eq!(schema.position("Sex_Label"), Some(1));
        assert_eq!(schema.position("Race_Label"), None);
        assert!(schema.has_column("Age"));
    }

    #[test]
    fn test_schema_validation() {
        assert!(FeatureSchema::new(vec![]).is_err());
        assert!(FeatureSchema::new(columns(&["Age", "Age"])).is_err());
        assert!(FeatureSchema::new(columns(&["Age", ""])).is_err());
    }

    #[test]
    fn test_schema_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");

        let schema = FeatureSchema::new(columns(&["Age", "Sex_Label", "Sleep_Hours"])).unwrap();
        schema.save(&path).unwrap();

        let loaded = FeatureSchema::load(&path).unwrap();
        assert_eq!(loaded, schema);
    }

    #[test]
    fn test_schema_load_failures() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            FeatureSchema::load(&missing),
            Err(ScreenError::ArtifactLoad(_))
        ));

        let malformed = dir.path().join("malformed.json");
        std::fs::write(&malformed, "{\"columns\": 7}").unwrap();
        assert!(matches!(
            FeatureSchema::load(&malformed),
            Err(ScreenError::ArtifactLoad(_))
        ));
    }
}
