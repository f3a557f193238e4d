//! Typed error definitions for blockchainincubator.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IncubatorError {
    #[error("Input path not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Input path is not a regular file: {0}")]
    InputNotFile(PathBuf),

    #[error("Output path is a directory: {0}")]
    OutputIsDirectory(PathBuf),

    #[error("Output directory does not exist: {0}")]
    OutputParentMissing(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid config {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl IncubatorError {
    /// Stable short identifier, emitted as the `code` field on error events.
    pub fn code(&self) -> &'static str {
        match self {
            IncubatorError::InputNotFound(_) => "input_not_found",
            IncubatorError::InputNotFile(_) => "input_not_file",
            IncubatorError::OutputIsDirectory(_) => "output_is_directory",
            IncubatorError::OutputParentMissing(_) => "output_parent_missing",
            IncubatorError::ConfigNotFound(_) => "config_not_found",
            IncubatorError::ConfigInvalid { .. } => "config_invalid",
            IncubatorError::Interrupted => "interrupted",
        }
    }
}
