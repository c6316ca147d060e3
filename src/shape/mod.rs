//! SHAPE module: pattern catalog, per-domain scoring, statistics, and insights.
//! Deterministic, stateless heuristics.

pub mod catalog;
pub mod classification;
pub mod evaluator;
pub mod insights;
pub mod stats;
pub mod types;

use crate::error::{Result, ShapeError};
use crate::transcript::{TranscriptInput, Turn, parse_transcript};
use catalog::PatternCatalog;
use classification::Classification;
use evaluator::evaluate_domain;
use std::sync::Arc;
use types::{AnalysisResult, Domain, ShapeScores};

/// Runs the full analysis against one shared, immutable catalog.
/// Cloning is cheap and every call works on its own locals.
#[derive(Debug, Clone)]
pub struct ShapeEngine {
    catalog: Arc<PatternCatalog>,
}

#[allow(clippy::new_without_default)]
impl ShapeEngine {
    pub fn new() -> Self {
        Self {
            catalog: PatternCatalog::standard(),
        }
    }

    pub fn with_catalog(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn analyze(&self, input: &TranscriptInput) -> Result<AnalysisResult> {
        let turns = parse_transcript(input);
        self.analyze_turns(&turns)
    }

    /// Analyze turns that were already parsed.
    pub fn analyze_turns(&self, turns: &[Turn]) -> Result<AnalysisResult> {
        let [structural, human, authorial, purpose, editorial] =
            Domain::ALL.map(|domain| evaluate_domain(&self.catalog, domain, turns));
        let total: u32 = [&structural, &human, &authorial, &purpose, &editorial]
            .iter()
            .map(|e| e.score)
            .sum();
        let scores = ShapeScores {
            structural,
            human,
            authorial,
            purpose,
            editorial,
            total,
        };

        let stats = stats::collect_stats(&self.catalog, turns);
        let (insights, recommendations) = insights::generate_insights(&self.catalog, &scores, &stats);

        let result = AnalysisResult {
            classification: Classification::from_total(scores.total),
            scores,
            stats,
            insights,
            recommendations,
        };
        verify(&result)?;
        tracing::debug!(
            "analysis complete: total={} classification={}",
            result.scores.total,
            result.classification
        );
        Ok(result)
    }
}

/// Reject results that break the scoring invariants rather than return them partially.
fn verify(result: &AnalysisResult) -> Result<()> {
    let scores = &result.scores;
    let sum: u32 = scores.iter().map(|e| e.score).sum();
    if sum != scores.total {
        return Err(analysis_error(format!(
            "total {} does not match domain sum {}",
            scores.total, sum
        )));
    }
    for eval in scores.iter() {
        if eval.evidence.len() != eval.hits || eval.hits > eval.max_patterns {
            return Err(analysis_error(format!(
                "{}: {} evidence items for {} hits",
                eval.domain.letter(),
                eval.evidence.len(),
                eval.hits
            )));
        }
        if eval.score % 4 != 0 || eval.score > evaluator::DOMAIN_MAX_SCORE {
            return Err(analysis_error(format!(
                "{}: score {} outside the allowed steps",
                eval.domain.letter(),
                eval.score
            )));
        }
    }
    for (i, rec) in result.recommendations.iter().enumerate() {
        if result.recommendations[..i].contains(rec) {
            return Err(analysis_error(format!("duplicate recommendation: {rec}")));
        }
    }
    Ok(())
}

fn analysis_error(message: String) -> ShapeError {
    tracing::error!("{}", message);
    ShapeError::Analysis { message }
}
