//! Domain-specific error types for shape-analyzer

use thiserror::Error;

/// Main error type for the SHAPE analyzer
#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input error: {message}")]
    Input { message: String },

    #[error("Unsupported file: {path} (allowed extensions: {allowed})")]
    UnsupportedFile { path: String, allowed: String },

    #[error("Input too large: {chars} characters exceeds the limit of {limit}")]
    InputTooLarge { chars: usize, limit: usize },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The one failure the engine surfaces; callers treat it as total failure.
    #[error("Analysis failed: {message}")]
    Analysis { message: String },
}

impl ShapeError {
    /// Message safe to show an end user; internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ShapeError::Config { .. } => "The analyzer is misconfigured.",
            ShapeError::Input { .. } => "The transcript could not be read.",
            ShapeError::UnsupportedFile { .. } => {
                "Please provide a .txt or .md file, or paste the transcript."
            }
            ShapeError::InputTooLarge { .. } => "The transcript is too long to analyze.",
            ShapeError::Serialization { .. } | ShapeError::Analysis { .. } => {
                "Analysis failed. Please try again."
            }
        }
    }
}

impl From<anyhow::Error> for ShapeError {
    fn from(err: anyhow::Error) -> Self {
        ShapeError::Analysis {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ShapeError {
    fn from(err: serde_json::Error) -> Self {
        ShapeError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ShapeError {
    fn from(err: toml::de::Error) -> Self {
        ShapeError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

impl From<std::io::Error> for ShapeError {
    fn from(err: std::io::Error) -> Self {
        ShapeError::Input {
            message: err.to_string(),
        }
    }
}

/// Result type alias for analyzer operations
pub type Result<T> = std::result::Result<T, ShapeError>;
