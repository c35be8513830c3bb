//! Error types for the pixname rename pipeline.
//!
//! Configuration and input errors end a run before any file is touched.
//! Pipeline errors are per-file and are reported without stopping the batch.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for pixname operations.
#[derive(Error, Debug)]
pub enum PixnameError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Per-file processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No credential for the vision API
    #[error("API key not found. Set GEMINI_API_KEY in your environment or .env file.")]
    MissingApiKey,

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-file errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Reading the image from disk failed
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Vision API call failed.
    ///
    /// The message is shown to the user as-is, so it carries no prefix.
    #[error("{message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// The vision API call did not finish in time
    #[error("Timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Renaming the file on disk failed
    #[error("Failed to rename {from} to {to}: {message}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    /// Input folder does not exist or is not a directory
    #[error("'{0}' is not a valid directory.")]
    NotADirectory(PathBuf),
}

/// Convenience type alias for pixname results.
pub type Result<T> = std::result::Result<T, PixnameError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
