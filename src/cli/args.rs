//! Command line argument parsing for the asdscreen CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// asdscreen - early autism screening questionnaire
#[derive(Parser, Debug, Clone)]
#[command(name = "asdscreen")]
#[command(about = "Early autism screening questionnaire backed by a pre-trained classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ScreenArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ScreenArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run one prediction from a JSON answers file
    Predict(PredictArgs),

    /// Run an interactive screening session
    Session(SessionArgs),

    /// Show the questionnaire and the trained column order
    Schema(SchemaArgs),

    /// Load the artifacts and check they are consistent
    Validate(ValidateArgs),
}

/// Arguments for a one-shot prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// JSON file mapping field names to answers
    #[arg(value_name = "ANSWERS_FILE")]
    pub answers_file: PathBuf,

    /// Directory holding model.json, scaler.json and schema.json
    #[arg(short, long, value_name = "ARTIFACTS_DIR", default_value = "artifacts")]
    pub artifacts: PathBuf,
}

/// Arguments for an interactive session
#[derive(Parser, Debug, Clone)]
pub struct SessionArgs {
    /// Directory holding model.json, scaler.json and schema.json
    #[arg(short, long, value_name = "ARTIFACTS_DIR", default_value = "artifacts")]
    pub artifacts: PathBuf,
}

/// Arguments for showing the questionnaire and schema
#[derive(Parser, Debug, Clone)]
pub struct SchemaArgs {
    /// Directory holding model.json, scaler.json and schema.json
    #[arg(short, long, value_name = "ARTIFACTS_DIR", default_value = "artifacts")]
    pub artifacts: PathBuf,
}

/// Arguments for validating the artifacts
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Directory holding model.json, scaler.json and schema.json
    #[arg(short, long, value_name = "ARTIFACTS_DIR", default_value = "artifacts")]
    pub artifacts: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
