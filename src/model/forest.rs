//! Random-forest binary classifier loaded from a JSON artifact.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenError};

/// Model metadata for tracking artifact provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Model version.
    pub version: String,
    /// Training timestamp.
    pub trained_at: chrono::DateTime<chrono::Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Model hyperparameters.
    pub hyperparameters: HashMap<String, f64>,
    /// Performance metrics on the validation set.
    pub validation_metrics: HashMap<String, f64>,
}

/// One node of a decision tree.
///
/// Internal nodes split on `feature_idx` against `threshold`; leaves carry
/// the positive-class fraction observed at that leaf during training.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TreeNode {
    /// Feature index for the split (-1 for a leaf).
    feature_idx: i32,
    /// Threshold value for the split.
    threshold: f64,
    /// Positive-class fraction (for leaf nodes).
    value: f64,
    /// Left child (feature <= threshold).
    left: Option<Box<TreeNode>>,
    /// Right child (feature > threshold).
    right: Option<Box<TreeNode>>,
}

/// A single decision tree of the forest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Option<Box<TreeNode>>,
}

impl DecisionTree {
    /// Create a tree that always predicts one positive-class fraction.
    pub fn leaf(value: f64) -> Self {
        DecisionTree {
            root: Some(Box::new(TreeNode {
                feature_idx: -1,
                threshold: 0.0,
                value,
                left: None,
                right: None,
            })),
        }
    }

    /// Create a single-split tree.
    pub fn stump(feature_idx: usize, threshold: f64, left_value: f64, right_value: f64) -> Self {
        DecisionTree {
            root: Some(Box::new(TreeNode {
                feature_idx: feature_idx as i32,
                threshold,
                value: 0.0,
                left: Some(Box::new(TreeNode {
                    feature_idx: -1,
                    threshold: 0.0,
                    value: left_value,
                    left: None,
                    right: None,
                })),
                right: Some(Box::new(TreeNode {
                    feature_idx: -1,
                    threshold: 0.0,
                    value: right_value,
                    left: None,
                    right: None,
                })),
            })),
        }
    }

    /// Walk the tree for one feature row.
    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        match &self.root {
            Some(root) => Self::predict_node(root, row),
            None => Err(ScreenError::prediction("decision tree has no nodes")),
        }
    }

    fn predict_node(node: &TreeNode, row: &[f64]) -> Result<f64> {
        if node.feature_idx < 0 {
            return Ok(node.value);
        }

        let idx = node.feature_idx as usize;
        let feature_value = row.get(idx).copied().ok_or_else(|| {
            ScreenError::prediction(format!(
                "model splits on feature {idx} but the row has {} columns",
                row.len()
            ))
        })?;

        if feature_value <= node.threshold {
            match &node.left {
                Some(left) => Self::predict_node(left, row),
                None => Ok(node.value),
            }
        } else {
            match &node.right {
                Some(right) => Self::predict_node(right, row),
                None => Ok(node.value),
            }
        }
    }

    fn validate(&self) -> Result<()> {
        match &self.root {
            Some(root) => Self::validate_node(root),
            None => Err(ScreenError::artifact("classifier tree has no nodes")),
        }
    }

    fn validate_node(node: &TreeNode) -> Result<()> {
        if node.feature_idx < 0 {
            if !(0.0..=1.0).contains(&node.value) {
                return Err(ScreenError::artifact(format!(
                    "leaf fraction {} outside [0, 1]",
                    node.value
                )));
            }
            return Ok(());
        }
        if let Some(left) = &node.left {
            Self::validate_node(left)?;
        }
        if let Some(right) = &node.right {
            Self::validate_node(right)?;
        }
        Ok(())
    }
}

/// A pre-trained random-forest binary classifier.
///
/// `predict_proba` averages the per-tree leaf fractions into
/// `[p0, p1]` with `p0 + p1 = 1`; `predict` thresholds `p1` at 0.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    metadata: ModelMetadata,
}

impl RandomForest {
    /// Assemble a forest from trees and metadata.
    pub fn new(trees: Vec<DecisionTree>, metadata: ModelMetadata) -> Self {
        RandomForest { trees, metadata }
    }

    /// Load a classifier artifact, validating its structure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScreenError::artifact(format!("cannot read model {}: {e}", path.display()))
        })?;

        let forest: RandomForest = serde_json::from_str(&content).map_err(|e| {
            ScreenError::artifact(format!("cannot parse model {}: {e}", path.display()))
        })?;

        if forest.trees.is_empty() {
            return Err(ScreenError::artifact(format!(
                "model {} has no trees",
                path.display()
            )));
        }
        for tree in &forest.trees {
            tree.validate()?;
        }

        Ok(forest)
    }

    /// Save the classifier as a JSON artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Class probabilities `[p0, p1]` for one scaled feature row.
    pub fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2]> {
        if self.trees.is_empty() {
            return Err(ScreenError::prediction("model has no trees"));
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict(row)?;
        }

        let p1 = (total / self.trees.len() as f64).clamp(0.0, 1.0);
        Ok([1.0 - p1, p1])
    }

    /// Predicted class for one scaled feature row: 1 when `p1 >= 0.5`.
    pub fn predict(&self, row: &[f64]) -> Result<u8> {
        let proba = self.predict_proba(row)?;
        Ok(if proba[1] >= 0.5 { 1 } else { 0 })
    }

    /// Number of trees in the ensemble.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Artifact metadata.
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_metadata() -> ModelMetadata {
        ModelMetadata {
            name: "screening_random_forest".to_string(),
            version: "1.0".to_string(),
            trained_at: chrono::Utc::now(),
            training_examples: 1200,
            hyperparameters: HashMap::from([("n_estimators".to_string(), 3.0)]),
            validation_metrics: HashMap::from([("auc".to_string(), 0.87)]),
        }
    }

    #[test]
    fn test_leaf_tree_prediction() {
        let tree = DecisionTree::leaf(0.75);
        assert_eq!(tree.predict(&[1.0, 2.0]).unwrap(), 0.75);
    }

    #[test]
    fn test_stump_prediction() {
        let tree = DecisionTree::stump(1, 0.5, 0.2, 0.9);
        assert_eq!(tree.predict(&[0.0, 0.3]).unwrap(), 0.2);
        assert_eq!(tree.predict(&[0.0, 0.7]).unwrap(), 0.9);
    }

    #[test]
    fn test_row_too_short_is_prediction_error() {
        let tree = DecisionTree::stump(5, 0.5, 0.2, 0.9);
        let err = tree.predict(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ScreenError::Prediction(_)));
    }

    #[test]
    fn test_proba_components_sum_to_one() {
        let forest = RandomForest::new(
            vec![
                DecisionTree::leaf(0.9),
                DecisionTree::leaf(0.6),
                DecisionTree::leaf(0.3),
            ],
            test_metadata(),
        );

        let proba = forest.predict_proba(&[0.0]).unwrap();
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert!((proba[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_predict_thresholds_at_half() {
        let high = RandomForest::new(vec![DecisionTree::leaf(0.5)], test_metadata());
        assert_eq!(high.predict(&[0.0]).unwrap(), 1);

        let low = RandomForest::new(vec![DecisionTree::leaf(0.49)], test_metadata());
        assert_eq!(low.predict(&[0.0]).unwrap(), 0);
    }

    #[test]
    fn test_empty_forest_fails() {
        let forest = RandomForest::new(vec![], test_metadata());
        assert!(matches!(
            forest.predict_proba(&[0.0]),
            Err(ScreenError::Prediction(_))
        ));
    }

    #[test]
    fn test_artifact_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let forest = RandomForest::new(
            vec![DecisionTree::stump(0, 2.5, 0.1, 0.8), DecisionTree::leaf(0.4)],
            test_metadata(),
        );
        forest.save(&path).unwrap();

        let loaded = RandomForest::load(&path).unwrap();
        assert_eq!(loaded.num_trees(), 2);
        assert_eq!(loaded.metadata().name, "screening_random_forest");
        assert_eq!(
            loaded.predict_proba(&[1.0]).unwrap(),
            forest.predict_proba(&[1.0]).unwrap()
        );
    }

    #[test]
    fn test_load_failures() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            RandomForest::load(&missing),
            Err(ScreenError::ArtifactLoad(_))
        ));

        let malformed = dir.path().join("malformed.json");
        std::fs::write(&malformed, "not json").unwrap();
        assert!(matches!(
            RandomForest::load(&malformed),
            Err(ScreenError::ArtifactLoad(_))
        ));

        // Structurally valid JSON, structurally invalid model
        let empty = dir.path().join("empty.json");
        let forest = RandomForest::new(vec![], test_metadata());
        forest.save(&empty).unwrap();
        assert!(matches!(
            RandomForest::load(&empty),
            Err(ScreenError::ArtifactLoad(_))
        ));

        let bad_leaf = dir.path().join("bad_leaf.json");
        let forest = RandomForest::new(vec![DecisionTree::leaf(1.5)], test_metadata());
        forest.save(&bad_leaf).unwrap();
        assert!(matches!(
            RandomForest::load(&bad_leaf),
            Err(ScreenError::ArtifactLoad(_))
        ));
    }
}
