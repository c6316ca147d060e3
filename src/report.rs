//! Versioned report envelope around an analysis result, plus a plain-text renderer.

use crate::error::{Result, ShapeError};
use crate::shape::classification::{Classification, GrowthPath};
use crate::shape::types::{AnalysisResult, ConversationStats, Insight, ShapeScores};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const REPORT_FORMAT_VERSION: &str = "shape/1";

/// Light reports carry scores, stats, and insights; full reports add
/// recommendations and the growth path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTier {
    Light,
    Full,
}

impl std::str::FromStr for ReportTier {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ReportTier::Light),
            "full" => Ok(ReportTier::Full),
            other => Err(ShapeError::Config {
                message: format!("unknown report tier '{other}' (expected light or full)"),
            }),
        }
    }
}

impl std::fmt::Display for ReportTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportTier::Light => write!(f, "light"),
            ReportTier::Full => write!(f, "full"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeReport {
    pub format_version: String,
    pub tier: ReportTier,
    pub generated_at: DateTime<Utc>,
    pub transcript_digest: String,
    pub classification: Classification,
    pub scores: ShapeScores,
    pub stats: ConversationStats,
    pub insights: Vec<Insight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_path: Option<GrowthPath>,
}

impl ShapeReport {
    pub fn build(result: AnalysisResult, tier: ReportTier, transcript_digest: String) -> Self {
        let full = tier == ReportTier::Full;
        Self {
            format_version: REPORT_FORMAT_VERSION.to_string(),
            tier,
            generated_at: Utc::now(),
            transcript_digest,
            classification: result.classification,
            growth_path: full.then(|| result.classification.growth_path()),
            recommendations: full.then_some(result.recommendations),
            scores: result.scores,
            stats: result.stats,
            insights: result.insights,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Short, stable fingerprint of the submitted transcript text.
pub fn transcript_digest(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex()[..16].to_string()
}

pub fn render_text(report: &ShapeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "SHAPE score: {}/100 ({})",
        report.scores.total, report.classification
    );
    for eval in report.scores.iter() {
        let _ = writeln!(
            out,
            "  {} {:<24} {:>2}/20  ({}/{} signals)",
            eval.domain.letter(),
            eval.domain.label(),
            eval.score,
            eval.hits,
            eval.max_patterns
        );
        for ev in &eval.evidence {
            let _ = writeln!(
                out,
                "      [{}] turn {}: \"{}\"",
                ev.detector_id, ev.turn_index, ev.snippet
            );
        }
    }

    let s = &report.stats;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Turns: {} (user {}, assistant {})",
        s.turns, s.user_turns, s.assistant_turns
    );
    let _ = writeln!(
        out,
        "Average words: user {}, assistant {}; user share of words {:.1}%",
        s.avg_user_words,
        s.avg_assistant_words,
        s.user_share_of_words * 100.0
    );

    if !report.insights.is_empty() {
        let _ = writeln!(out, "\nInsights:");
        for insight in &report.insights {
            let _ = writeln!(out, "  - [{}] {}", insight.domain.letter(), insight.finding);
        }
    }
    if let Some(recs) = &report.recommendations
        && !recs.is_empty()
    {
        let _ = writeln!(out, "\nRecommendations:");
        for (i, rec) in recs.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, rec);
        }
    }
    if let Some(path) = &report.growth_path {
        let _ = writeln!(out, "\n{}\n  {}", path.title, path.summary);
        for tactic in &path.tactics {
            let _ = writeln!(out, "  * {}", tactic);
        }
    }
    out
}
