//! Aggregate conversation statistics.

use super::catalog::{OUTLINE_DETECTORS, PURPOSE_FRAMING_DETECTORS, PatternCatalog};
use super::types::{ConversationStats, Domain};
use crate::transcript::{Role, Turn};
use once_cell::sync::Lazy;
use regex::Regex;

/// User turns inspected for early purpose framing.
pub const EARLY_USER_TURNS: usize = 3;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9'-]+").expect("regex should compile"));

pub fn word_count(text: &str) -> usize {
    WORD.find_iter(text).count()
}

pub fn collect_stats(catalog: &PatternCatalog, turns: &[Turn]) -> ConversationStats {
    let mut user_turns = 0usize;
    let mut assistant_turns = 0usize;
    let mut user_words = 0usize;
    let mut assistant_words = 0usize;

    for turn in turns {
        match turn.role {
            Role::User => {
                user_turns += 1;
                user_words += word_count(&turn.text);
            }
            Role::Assistant => {
                assistant_turns += 1;
                assistant_words += word_count(&turn.text);
            }
            Role::System | Role::Tool => {}
        }
    }

    let opening = turns
        .iter()
        .filter(|t| t.role == Role::User)
        .take(EARLY_USER_TURNS)
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let started_with_purpose = any_detector_matches(
        catalog,
        Domain::Purpose,
        &PURPOSE_FRAMING_DETECTORS,
        std::iter::once(opening.as_str()),
    );
    let used_outline = any_detector_matches(
        catalog,
        Domain::Structural,
        &OUTLINE_DETECTORS,
        turns.iter().map(|t| t.text.as_str()),
    );

    ConversationStats {
        turns: turns.len(),
        user_turns,
        assistant_turns,
        user_words,
        assistant_words,
        avg_user_words: average(user_words, user_turns),
        avg_assistant_words: average(assistant_words, assistant_turns),
        user_share_of_words: round3(user_words as f64 / (user_words + assistant_words).max(1) as f64),
        started_with_purpose,
        used_outline,
    }
}

fn any_detector_matches<'a>(
    catalog: &PatternCatalog,
    domain: Domain,
    positions: &[usize],
    texts: impl Iterator<Item = &'a str>,
) -> bool {
    let detectors: Vec<_> = positions
        .iter()
        .filter_map(|p| catalog.detector(domain, *p))
        .collect();
    texts
        .into_iter()
        .any(|text| detectors.iter().any(|d| d.is_match(text)))
}

fn average(words: usize, turns: usize) -> u64 {
    if turns == 0 {
        return 0;
    }
    (words as f64 / turns as f64).round() as u64
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
