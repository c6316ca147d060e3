//! Types for SHAPE analysis results.

use super::classification::Classification;
use serde::{Deserialize, Serialize};

/// One of the five scored dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "S")]
    Structural,
    #[serde(rename = "H")]
    Human,
    #[serde(rename = "A")]
    Authorial,
    #[serde(rename = "P")]
    Purpose,
    #[serde(rename = "E")]
    Editorial,
}

impl Domain {
    /// Fixed evaluation and reporting order.
    pub const ALL: [Domain; 5] = [
        Domain::Structural,
        Domain::Human,
        Domain::Authorial,
        Domain::Purpose,
        Domain::Editorial,
    ];

    pub fn letter(&self) -> &'static str {
        match self {
            Domain::Structural => "S",
            Domain::Human => "H",
            Domain::Authorial => "A",
            Domain::Purpose => "P",
            Domain::Editorial => "E",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Domain::Structural => "Structural Vision",
            Domain::Human => "Human-Led Meaning",
            Domain::Authorial => "Authorial Voice",
            Domain::Purpose => "Purpose Framing",
            Domain::Editorial => "Editorial Intervention",
        }
    }

    pub(crate) fn position(&self) -> usize {
        match self {
            Domain::Structural => 0,
            Domain::Human => 1,
            Domain::Authorial => 2,
            Domain::Purpose => 3,
            Domain::Editorial => 4,
        }
    }
}

/// First-match snippet recorded for a detector hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub detector_id: String,
    pub snippet: String,
    pub turn_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvaluation {
    pub domain: Domain,
    pub score: u32,
    pub hits: usize,
    pub max_patterns: usize,
    pub evidence: Vec<Evidence>,
}

/// Per-domain evaluations keyed by letter, plus their sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeScores {
    #[serde(rename = "S")]
    pub structural: DomainEvaluation,
    #[serde(rename = "H")]
    pub human: DomainEvaluation,
    #[serde(rename = "A")]
    pub authorial: DomainEvaluation,
    #[serde(rename = "P")]
    pub purpose: DomainEvaluation,
    #[serde(rename = "E")]
    pub editorial: DomainEvaluation,
    pub total: u32,
}

impl ShapeScores {
    pub fn get(&self, domain: Domain) -> &DomainEvaluation {
        match domain {
            Domain::Structural => &self.structural,
            Domain::Human => &self.human,
            Domain::Authorial => &self.authorial,
            Domain::Purpose => &self.purpose,
            Domain::Editorial => &self.editorial,
        }
    }

    /// Evaluations in S, H, A, P, E order.
    pub fn iter(&self) -> impl Iterator<Item = &DomainEvaluation> {
        Domain::ALL.into_iter().map(move |d| self.get(d))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStats {
    pub turns: usize,
    pub user_turns: usize,
    pub assistant_turns: usize,
    pub user_words: usize,
    pub assistant_words: usize,
    pub avg_user_words: u64,
    pub avg_assistant_words: u64,
    /// userWords / max(userWords + assistantWords, 1), 3 decimals
    pub user_share_of_words: f64,
    pub started_with_purpose: bool,
    pub used_outline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub domain: Domain,
    pub finding: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub scores: ShapeScores,
    pub stats: ConversationStats,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
    pub classification: Classification,
}
