//! # asdscreen
//!
//! A command-line early autism screening questionnaire backed by a
//! pre-trained classifier.
//!
//! ## Features
//!
//! - Fixed questionnaire with collection-time validation
//! - Static categorical encoding tables
//! - Feature alignment against the trained column order
//! - Standard scaling and random-forest inference from JSON artifacts
//! - In-memory session history
//!
//! The tool is a thin, fully synchronous pipeline: collect answers, encode
//! them, align the result to the trained feature schema, scale, classify,
//! and render a likelihood label with a confidence score. The classifier,
//! scaler and schema are opaque artifacts produced by an external training
//! pipeline; this crate only loads and applies them.

pub mod cli;
pub mod encoding;
pub mod error;
pub mod model;
pub mod predict;
pub mod schema;
pub mod survey;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
