//! Ordered insights and a duplicate-free recommendation list.

use super::catalog::PatternCatalog;
use super::types::{ConversationStats, Domain, Insight, ShapeScores};

/// Domains at or below this many hits get a "limited signals" insight.
pub const LIMITED_SIGNAL_HITS: usize = 2;
/// Suggestions kept for a domain with limited signals.
pub const LIMITED_SUGGESTIONS: usize = 2;

pub const LATE_PURPOSE_FINDING: &str = "Purpose cues not stated early (first 3 user turns).";
pub const LATE_PURPOSE_RECOMMENDATION: &str = "State your goal, audience, and deliverable up front.";
pub const NO_SCAFFOLD_FINDING: &str = "No outline or scaffolding detected.";
pub const NO_SCAFFOLD_RECOMMENDATION: &str =
    "Sketch an outline or bullet scaffold before asking for a draft.";

/// Append-if-absent list that keeps first-occurrence order.
#[derive(Debug, Default)]
struct Recommendations(Vec<String>);

impl Recommendations {
    fn push(&mut self, rec: &str) {
        if !self.0.iter().any(|r| r == rec) {
            self.0.push(rec.to_string());
        }
    }

    fn extend<'a>(&mut self, recs: impl IntoIterator<Item = &'a String>) {
        for rec in recs {
            self.push(rec);
        }
    }
}

pub fn generate_insights(
    catalog: &PatternCatalog,
    scores: &ShapeScores,
    stats: &ConversationStats,
) -> (Vec<Insight>, Vec<String>) {
    let mut insights = Vec::new();
    let mut recs = Recommendations::default();

    for eval in scores.iter() {
        let label = eval.domain.label();
        let suggestions = catalog.suggestions(eval.domain);
        match eval.hits {
            0 => {
                insights.push(Insight {
                    domain: eval.domain,
                    finding: format!("{label}: no clear signals detected."),
                });
                recs.extend(suggestions);
            }
            h if h <= LIMITED_SIGNAL_HITS => {
                insights.push(Insight {
                    domain: eval.domain,
                    finding: format!("{label}: limited signals ({h}/{}).", eval.max_patterns),
                });
                recs.extend(suggestions.iter().take(LIMITED_SUGGESTIONS));
            }
            _ => {}
        }
    }

    if !stats.started_with_purpose {
        insights.push(Insight {
            domain: Domain::Purpose,
            finding: LATE_PURPOSE_FINDING.to_string(),
        });
        recs.push(LATE_PURPOSE_RECOMMENDATION);
    }

    if !stats.used_outline && scores.structural.hits == 0 {
        insights.push(Insight {
            domain: Domain::Structural,
            finding: NO_SCAFFOLD_FINDING.to_string(),
        });
        recs.push(NO_SCAFFOLD_RECOMMENDATION);
    }

    tracing::debug!(
        "generated {} insights, {} recommendations",
        insights.len(),
        recs.0.len()
    );
    (insights, recs.0)
}
