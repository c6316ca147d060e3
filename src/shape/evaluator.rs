//! Per-domain scoring against user turns.

use super::catalog::{DETECTORS_PER_DOMAIN, PatternCatalog};
use super::types::{Domain, DomainEvaluation, Evidence};
use crate::transcript::{Role, Turn};

/// Characters of context kept before a match.
pub const SNIPPET_LEAD: usize = 20;
/// Maximum snippet length in characters, lead included.
pub const SNIPPET_MAX: usize = 120;

/// Points available per domain; hits scale linearly into it.
pub const DOMAIN_MAX_SCORE: u32 = 20;

/// Score one domain. Each detector contributes at most one hit: its first
/// match across user turns in transcript order.
pub fn evaluate_domain(catalog: &PatternCatalog, domain: Domain, turns: &[Turn]) -> DomainEvaluation {
    let user_turns: Vec<&Turn> = turns.iter().filter(|t| t.role == Role::User).collect();
    let patterns = catalog.domain(domain);

    let mut evidence = Vec::new();
    for detector in patterns.detectors.iter() {
        let first = user_turns
            .iter()
            .find_map(|turn| detector.find(&turn.text).map(|pos| (*turn, pos)));
        if let Some((turn, pos)) = first {
            evidence.push(Evidence {
                detector_id: detector.id().to_string(),
                snippet: snippet_around(&turn.text, pos),
                turn_index: turn.index,
            });
        }
    }

    let hits = evidence.len();
    let evaluation = DomainEvaluation {
        domain,
        score: score_for_hits(hits),
        hits,
        max_patterns: DETECTORS_PER_DOMAIN,
        evidence,
    };
    tracing::debug!(
        "{} evaluated: hits={} score={}",
        domain.letter(),
        evaluation.hits,
        evaluation.score
    );
    evaluation
}

/// round(hits / 5 * 20); always a multiple of 4.
pub fn score_for_hits(hits: usize) -> u32 {
    let ratio = hits.min(DETECTORS_PER_DOMAIN) as f64 / DETECTORS_PER_DOMAIN as f64;
    (ratio * DOMAIN_MAX_SCORE as f64).round() as u32
}

/// Bounded excerpt starting a little before `byte_pos`, whitespace collapsed.
pub fn snippet_around(text: &str, byte_pos: usize) -> String {
    let match_char = text
        .char_indices()
        .take_while(|(i, _)| *i < byte_pos)
        .count();
    let start = match_char.saturating_sub(SNIPPET_LEAD);
    let window: String = text.chars().skip(start).take(SNIPPET_MAX).collect();
    window.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(text: &str, index: usize) -> Turn {
        Turn {
            role: Role::User,
            text: text.to_string(),
            index,
        }
    }

    #[test]
    fn test_score_steps() {
        let scores: Vec<u32> = (0..=5).map(score_for_hits).collect();
        assert_eq!(scores, vec![0, 4, 8, 12, 16, 20]);
        assert_eq!(score_for_hits(9), 20);
    }

    #[test]
    fn test_snippet_window() {
        let text = format!("{}needle{}", "a".repeat(50), "b".repeat(200));
        let snippet = snippet_around(&text, 50);
        assert_eq!(snippet.chars().count(), SNIPPET_MAX);
        assert!(snippet.starts_with(&"a".repeat(SNIPPET_LEAD)));
        assert!(snippet[SNIPPET_LEAD..].starts_with("needle"));
    }

    #[test]
    fn test_snippet_collapses_whitespace_and_handles_multibyte() {
        let text = "héllo   wörld\n\n  my goal";
        let pos = text.find("goal").expect("goal present");
        assert_eq!(snippet_around(text, pos), "héllo wörld my goal");
    }

    #[test]
    fn test_only_user_turns_count() {
        let catalog = PatternCatalog::standard();
        let turns = vec![Turn {
            role: Role::Assistant,
            text: "Here is an outline with headings".to_string(),
            index: 0,
        }];
        let eval = evaluate_domain(&catalog, Domain::Structural, &turns);
        assert_eq!(eval.hits, 0);
        assert!(eval.evidence.is_empty());
    }

    #[test]
    fn test_first_match_wins_and_evidence_follows_detector_order() {
        let catalog = PatternCatalog::standard();
        let turns = vec![
            user("Who is the audience here?", 0),
            user("My goal is a memo. The audience is the board.", 1),
        ];
        let eval = evaluate_domain(&catalog, Domain::Purpose, &turns);
        let ids: Vec<&str> = eval.evidence.iter().map(|e| e.detector_id.as_str()).collect();
        assert_eq!(ids, vec!["P.goal", "P.audience", "P.deliverable"]);
        // audience matched first in turn 0, not again in turn 1
        assert_eq!(eval.evidence[1].turn_index, 0);
        assert_eq!(eval.hits, 3);
        assert_eq!(eval.score, 12);
        assert_eq!(eval.max_patterns, 5);
    }
}
