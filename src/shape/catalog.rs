//! Detector trait and the fixed SHAPE pattern table.

use super::types::Domain;
use crate::error::{Result, ShapeError};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

/// Every domain carries exactly this many detectors.
pub const DETECTORS_PER_DOMAIN: usize = 5;

/// Upper bound on authored suggestions per domain.
pub const MAX_SUGGESTIONS: usize = 3;

/// Structural detectors that count as outlining: outline wording, numbered and bulleted lists.
pub const OUTLINE_DETECTORS: [usize; 3] = [0, 3, 4];

/// Purpose detectors that count as early framing: goal, audience, success criteria.
pub const PURPOSE_FRAMING_DETECTORS: [usize; 3] = [0, 1, 4];

/// A named rule that reports where in a text it matched, if anywhere.
pub trait Detector {
    fn id(&self) -> &str;
    /// Byte offset of the first match.
    fn find(&self, text: &str) -> Option<usize>;

    fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}

/// Case-insensitive regular-expression detector
#[derive(Debug, Clone)]
pub struct RegexDetector {
    id: String,
    pattern: Regex,
}

impl RegexDetector {
    pub fn new(id: impl Into<String>, pattern: &str) -> Result<Self> {
        let id = id.into();
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map_err(|e| ShapeError::Config {
                message: format!("detector {id}: {e}"),
            })?;
        Ok(Self { id, pattern })
    }
}

impl Detector for RegexDetector {
    fn id(&self) -> &str {
        &self.id
    }

    fn find(&self, text: &str) -> Option<usize> {
        self.pattern.find(text).map(|m| m.start())
    }
}

pub type SharedDetector = Arc<dyn Detector + Send + Sync>;

/// Detectors and authored suggestions for one domain
#[derive(Clone)]
pub struct DomainPatterns {
    pub domain: Domain,
    pub detectors: Vec<SharedDetector>,
    pub suggestions: Vec<String>,
}

impl std::fmt::Debug for DomainPatterns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.detectors.iter().map(|d| d.id()).collect();
        f.debug_struct("DomainPatterns")
            .field("domain", &self.domain)
            .field("detectors", &ids)
            .field("suggestions", &self.suggestions)
            .finish()
    }
}

/// Immutable table of 5 domains × 5 ordered detectors.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    domains: Vec<DomainPatterns>,
}

impl PatternCatalog {
    /// Build a catalog, rejecting tables that break the 5×5 shape or domain order.
    pub fn new(domains: Vec<DomainPatterns>) -> Result<Self> {
        if domains.len() != Domain::ALL.len() {
            return Err(ShapeError::Config {
                message: format!("expected {} domains, got {}", Domain::ALL.len(), domains.len()),
            });
        }
        for (expected, patterns) in Domain::ALL.iter().zip(domains.iter()) {
            if patterns.domain != *expected {
                return Err(ShapeError::Config {
                    message: format!(
                        "domain out of order: expected {}, got {}",
                        expected.letter(),
                        patterns.domain.letter()
                    ),
                });
            }
            if patterns.detectors.len() != DETECTORS_PER_DOMAIN {
                return Err(ShapeError::Config {
                    message: format!(
                        "{} has {} detectors, expected {}",
                        patterns.domain.label(),
                        patterns.detectors.len(),
                        DETECTORS_PER_DOMAIN
                    ),
                });
            }
            if patterns.suggestions.len() > MAX_SUGGESTIONS {
                return Err(ShapeError::Config {
                    message: format!(
                        "{} has {} suggestions, at most {} allowed",
                        patterns.domain.label(),
                        patterns.suggestions.len(),
                        MAX_SUGGESTIONS
                    ),
                });
            }
        }
        Ok(Self { domains })
    }

    /// The built-in SHAPE table, shared across engines.
    pub fn standard() -> Arc<PatternCatalog> {
        STANDARD.clone()
    }

    pub fn domain(&self, domain: Domain) -> &DomainPatterns {
        // new() guarantees one entry per domain in Domain::ALL order
        &self.domains[domain.position()]
    }

    pub fn detector(&self, domain: Domain, position: usize) -> Option<&SharedDetector> {
        self.domain(domain).detectors.get(position)
    }

    pub fn suggestions(&self, domain: Domain) -> &[String] {
        &self.domain(domain).suggestions
    }

    pub fn domains(&self) -> impl Iterator<Item = &DomainPatterns> {
        self.domains.iter()
    }
}

// (id, pattern) in detector order
type PatternTable = [(&'static str, &'static str); DETECTORS_PER_DOMAIN];

const STRUCTURAL: PatternTable = [
    (
        "outline",
        r"\b(?:outlines?|outlining|headings?|headers?|sections?|table of contents)\b",
    ),
    (
        "reorder",
        r"\b(?:re-?order\w*|re-?organi[sz]\w*|rearrang\w*|move (?:this|that|it) (?:up|down|before|after))\b",
    ),
    (
        "flow",
        r"\b(?:flow|structure[ds]?|structuring|transitions?|sequenc(?:e|ing))\b",
    ),
    ("numbered_list", r"(?:^|\s)\d{1,2}[.)]\s+\S"),
    ("bulleted_list", r"^[ \t]*[-*•][ \t]+\S"),
];

const HUMAN: PatternTable = [
    (
        "example",
        r"\b(?:for example|for instance|such as|an example|e\.g\.)",
    ),
    (
        "definition",
        r"\b(?:by \w+ i mean|what i mean by|i define|defined as|definition of|refers to)\b",
    ),
    (
        "implication",
        r"\b(?:this means|which means|that means|implies|implication|the point is|so what this)\b",
    ),
    (
        "personal_context",
        r"\b(?:in my experience|my (?:team|company|students|clients|manager|boss|job|work|class|kids)|when i was|i remember|personally)\b",
    ),
    (
        "reframing",
        r"\b(?:in other words|put (?:it )?another way|reframe|re-frame|think of it as|rather than|instead of)\b",
    ),
];

const AUTHORIAL: PatternTable = [
    ("voice_request", r"\b(?:voice|tone|style|register)\b"),
    (
        "tone_adjective",
        r"\b(?:formal|informal|casual|conversational|professional|friendly|playful|witty|academic|warm|punchy|concise|humorous|serious)\b",
    ),
    (
        "jargon_avoidance",
        r"\b(?:jargon|plain (?:english|language)|simpler (?:words|language)|less technical|buzzwords?|cliches?)\b",
    ),
    (
        "my_voice_rewrite",
        r"\b(?:sounds? (?:more )?like me|in my (?:own )?(?:voice|words)|my (?:writing )?style|more personal|the way i (?:write|talk))\b",
    ),
    (
        "point_of_view",
        r"\b(?:first[- ]person|second[- ]person|third[- ]person|point of view|pov|perspective)\b",
    ),
];

const PURPOSE: PatternTable = [
    (
        "goal",
        r"\b(?:goals?|objectives?|aim is|purpose|trying to|i want to|i need to)\b",
    ),
    (
        "audience",
        r"\b(?:audience|readers?|stakeholders|for (?:executives|students|beginners|customers|clients|experts|kids|my (?:boss|team|manager|class)))\b",
    ),
    (
        "deliverable",
        r"\b(?:report|email|essay|blog post|memo|proposal|summary|article|letter|presentation|slide deck|cover letter|deliverable)\b",
    ),
    (
        "constraint",
        r"\b(?:deadline|due (?:on|by)|by (?:monday|tuesday|wednesday|thursday|friday|saturday|sunday|tomorrow|tonight|end of)|word (?:count|limit)|under \d+ words|no more than|at most|within \d+)\b",
    ),
    (
        "success_criteria",
        r"\b(?:success|successful|criteria|so that|in order to|should result in|measure of|outcome)\b",
    ),
];

const EDITORIAL: PatternTable = [
    (
        "correction",
        r"\b(?:wrong|incorrect|inaccurate|mistakes?|not (?:quite )?right|correction|that's not)\b",
    ),
    (
        "revise",
        r"\b(?:fix|revise|revision|edit|rewrite|redo|tweak|adjust|change)\b",
    ),
    (
        "elaborate",
        r"\b(?:add (?:more|an?|some)|elaborate|expand|go deeper|more detail|flesh out)\b",
    ),
    (
        "removal",
        r"\b(?:remove|delete|cut|drop|shorten|trim|get rid of|leave out)\b",
    ),
    (
        "emphasis",
        r"\b(?:emphasi[sz]e|emphasis|highlight|focus (?:more )?on|downplay|play up|tone down|de-?emphasi[sz]e)\b",
    ),
];

fn suggestions_for(domain: Domain) -> [&'static str; MAX_SUGGESTIONS] {
    match domain {
        Domain::Structural => [
            "Sketch an outline or bullet scaffold before asking for a draft.",
            "Ask the AI to reorganize sections to match the flow you intend.",
            "Use numbered steps or headings to show the structure you want.",
        ],
        Domain::Human => [
            "Add a concrete example from your own experience.",
            "Define key terms the way you mean them.",
            "Spell out what the ideas imply for your reader.",
        ],
        Domain::Authorial => [
            "Describe the voice and tone you want (for instance warm, direct, formal).",
            "Ask the AI to avoid jargon and keep your phrasing.",
            "Share a sample of your writing and ask for a rewrite in that voice.",
        ],
        Domain::Purpose => [
            "State your goal, audience, and deliverable up front.",
            "Name constraints such as length, deadline, or format.",
            "Say what a successful result looks like.",
        ],
        Domain::Editorial => [
            "Point out specific errors and ask for targeted fixes.",
            "Ask to expand weak sections or cut filler.",
            "Tell the AI which points to emphasize or downplay.",
        ],
    }
}

fn table_for(domain: Domain) -> &'static PatternTable {
    match domain {
        Domain::Structural => &STRUCTURAL,
        Domain::Human => &HUMAN,
        Domain::Authorial => &AUTHORIAL,
        Domain::Purpose => &PURPOSE,
        Domain::Editorial => &EDITORIAL,
    }
}

fn build_standard() -> Result<PatternCatalog> {
    let mut domains = Vec::with_capacity(Domain::ALL.len());
    for domain in Domain::ALL {
        let mut detectors: Vec<SharedDetector> = Vec::with_capacity(DETECTORS_PER_DOMAIN);
        for (name, pattern) in table_for(domain) {
            let id = format!("{}.{}", domain.letter(), name);
            detectors.push(Arc::new(RegexDetector::new(id, pattern)?));
        }
        domains.push(DomainPatterns {
            domain,
            detectors,
            suggestions: suggestions_for(domain).iter().map(|s| s.to_string()).collect(),
        });
    }
    PatternCatalog::new(domains)
}

static STANDARD: Lazy<Arc<PatternCatalog>> = Lazy::new(|| {
    Arc::new(build_standard().expect("built-in SHAPE patterns should compile"))
});

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(domain: Domain, position: usize, text: &str) -> bool {
        let catalog = PatternCatalog::standard();
        catalog
            .detector(domain, position)
            .map(|d| d.is_match(text))
            .unwrap_or(false)
    }

    #[test]
    fn test_standard_shape() {
        let catalog = PatternCatalog::standard();
        for patterns in catalog.domains() {
            assert_eq!(patterns.detectors.len(), DETECTORS_PER_DOMAIN);
            assert_eq!(patterns.suggestions.len(), MAX_SUGGESTIONS);
        }
        assert_eq!(
            catalog.detector(Domain::Structural, 3).map(|d| d.id().to_string()),
            Some("S.numbered_list".to_string())
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert!(hit(Domain::Structural, 0, "Here is my OUTLINE"));
        assert!(hit(Domain::Purpose, 1, "The AUDIENCE is new hires"));
    }

    #[test]
    fn test_list_syntax() {
        assert!(hit(Domain::Structural, 3, "1. Intro"));
        assert!(hit(Domain::Structural, 3, "outline: 1. Intro 2. Body"));
        assert!(!hit(Domain::Structural, 3, "version2.0 shipped"));
        assert!(hit(Domain::Structural, 4, "points:\n- first\n- second"));
        assert!(hit(Domain::Structural, 4, "* item"));
        assert!(!hit(Domain::Structural, 4, "a well-known fact"));
    }

    #[test]
    fn test_domain_detectors() {
        assert!(hit(Domain::Human, 0, "For instance, our pilot failed"));
        assert!(hit(Domain::Human, 4, "In other words, keep it small"));
        assert!(hit(Domain::Authorial, 2, "please avoid jargon"));
        assert!(hit(Domain::Authorial, 4, "write it in first person"));
        assert!(hit(Domain::Purpose, 3, "I need it by Friday"));
        assert!(hit(Domain::Editorial, 3, "cut the second paragraph"));
        assert!(hit(Domain::Editorial, 4, "highlight the savings"));
    }

    #[test]
    fn test_find_reports_position() {
        let catalog = PatternCatalog::standard();
        let goal = catalog.detector(Domain::Purpose, 0).expect("goal detector");
        assert_eq!(goal.find("My goal is clarity"), Some(3));
        assert_eq!(goal.find("nothing here"), None);
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let catalog = PatternCatalog::standard();
        let mut domains: Vec<DomainPatterns> = catalog.domains().cloned().collect();
        domains[2].detectors.pop();
        assert!(PatternCatalog::new(domains).is_err());

        let mut swapped: Vec<DomainPatterns> = catalog.domains().cloned().collect();
        swapped.swap(0, 1);
        assert!(PatternCatalog::new(swapped).is_err());
    }

    #[test]
    fn test_invalid_regex_is_config_error() {
        let err = RegexDetector::new("bad", "(unclosed").unwrap_err();
        assert!(matches!(err, ShapeError::Config { .. }));
    }
}
