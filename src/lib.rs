//! Scores a human/AI chat transcript on the five SHAPE dimensions:
//! Structural Vision, Human-Led Meaning, Authorial Voice, Purpose Framing,
//! and Editorial Intervention.
//!
//! ```ignore
//! let result = shape_analyzer::analyze("User: My goal is a memo for executives.")?;
//! assert!(result.stats.started_with_purpose);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod shape;
pub mod transcript;

pub use error::{Result, ShapeError};
pub use shape::ShapeEngine;
pub use shape::types::{AnalysisResult, Domain};
pub use transcript::{RawTurn, Role, TranscriptInput, Turn};

/// Analyze a transcript with the built-in pattern catalog.
pub fn analyze(input: impl Into<TranscriptInput>) -> Result<AnalysisResult> {
    ShapeEngine::new().analyze(&input.into())
}
