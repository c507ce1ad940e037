//! Inference artifacts: the pre-trained classifier and scaler.
//!
//! Both are opaque, externally trained artifacts persisted as JSON by the
//! training pipeline. This crate only loads and applies them; there is no
//! training code here.

pub mod forest;
pub mod scaler;

// Re-export commonly used types
pub use forest::{DecisionTree, ModelMetadata, RandomForest};
pub use scaler::StandardScaler;
