use std::path::PathBuf;

use agelens_core::CoreError;
use thiserror::Error;

/// Per-request failures of the orchestrator.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Input reduced to nothing after trimming. Surfaced as a warning.
    #[error("input is empty after trimming whitespace")]
    EmptyInput,

    /// Batch table lacks a required column. No rows were processed.
    #[error("table is missing required column {0:?}")]
    MissingColumn(String),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Failures loading or validating a platform's artifacts. Fatal to the session.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid token pattern {pattern:?}: {source}")]
    TokenPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("incompatible artifact: {0}")]
    Incompatible(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
