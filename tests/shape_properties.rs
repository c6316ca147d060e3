//! End-to-end properties of the SHAPE analysis pipeline

use shape_analyzer::shape::catalog::PatternCatalog;
use shape_analyzer::shape::insights::{
    LATE_PURPOSE_FINDING, LATE_PURPOSE_RECOMMENDATION, NO_SCAFFOLD_FINDING,
    NO_SCAFFOLD_RECOMMENDATION,
};
use shape_analyzer::transcript::parse_transcript;
use shape_analyzer::{AnalysisResult, Domain, RawTurn, Role, TranscriptInput, analyze};

const SAMPLES: &[&str] = &[
    "",
    "User: Here's my outline: 1. Intro 2. Body 3. Conclusion",
    "User: My goal is to write a report for executives by Friday.\nAssistant: Sure.",
    "Human: hi\nAI: hello",
    "[not valid json",
    r#"[{"role":"user","text":"Rewrite this in my voice, casual tone, no jargon."},{"role":"assistant","text":"Done."}]"#,
    "User: For example, in my experience the team ignores memos.\nIn other words, keep it short.\n- point one\n- point two\nAssistant: Noted.\nUser: That's wrong. Fix the intro, remove the jargon, and highlight the savings.",
];

fn check_invariants(result: &AnalysisResult) {
    let sum: u32 = result.scores.iter().map(|e| e.score).sum();
    assert_eq!(result.scores.total, sum);
    assert_eq!(result.scores.total % 4, 0);
    assert!(result.scores.total <= 100);
    for eval in result.scores.iter() {
        assert!(eval.hits <= 5);
        assert_eq!(eval.evidence.len(), eval.hits);
        assert_eq!(eval.max_patterns, 5);
        assert!([0, 4, 8, 12, 16, 20].contains(&eval.score));
    }
    let mut seen = std::collections::HashSet::new();
    for rec in &result.recommendations {
        assert!(seen.insert(rec.clone()), "duplicate recommendation: {rec}");
    }
}

#[test]
fn test_invariants_hold_for_samples() {
    for sample in SAMPLES {
        let result = analyze(*sample).expect("analysis succeeds");
        check_invariants(&result);
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    for sample in SAMPLES {
        let first = analyze(*sample).unwrap();
        let second = analyze(*sample).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_concurrent_calls_match_sequential() {
    let expected: Vec<AnalysisResult> = SAMPLES.iter().map(|s| analyze(*s).unwrap()).collect();
    let handles: Vec<_> = SAMPLES
        .iter()
        .map(|s| {
            let s = s.to_string();
            std::thread::spawn(move || analyze(s).unwrap())
        })
        .collect();
    for (handle, want) in handles.into_iter().zip(expected) {
        assert_eq!(handle.join().unwrap(), want);
    }
}

#[test]
fn test_structured_round_trip() {
    let input = TranscriptInput::Structured(vec![
        RawTurn::new("user", "hi"),
        RawTurn::new("assistant", "hello"),
    ]);
    let turns = parse_transcript(&input);
    assert_eq!(turns.len(), 2);
    assert_eq!((turns[0].role, turns[0].text.as_str(), turns[0].index), (Role::User, "hi", 0));
    assert_eq!(
        (turns[1].role, turns[1].text.as_str(), turns[1].index),
        (Role::Assistant, "hello", 1)
    );
}

#[test]
fn test_structured_and_json_string_agree() {
    let structured = analyze(vec![
        RawTurn::new("user", "My goal is a proposal."),
        RawTurn::new("assistant", "Here it is."),
    ])
    .unwrap();
    let json = analyze(
        r#"[{"role":"user","text":"My goal is a proposal."},{"role":"assistant","text":"Here it is."}]"#,
    )
    .unwrap();
    assert_eq!(structured, json);
}

#[test]
fn test_empty_input() {
    let result = analyze("").unwrap();
    assert_eq!(result.scores.total, 0);
    assert!(result.scores.iter().all(|e| e.hits == 0));
    assert_eq!(result.stats.turns, 0);
    assert_eq!(result.stats.user_share_of_words, 0.0);

    let findings: Vec<&str> = result.insights.iter().map(|i| i.finding.as_str()).collect();
    for domain in Domain::ALL {
        let expected = format!("{}: no clear signals detected.", domain.label());
        assert!(findings.contains(&expected.as_str()), "missing {expected}");
    }
    assert!(findings.contains(&LATE_PURPOSE_FINDING));
    assert!(findings.contains(&NO_SCAFFOLD_FINDING));
    assert_eq!(result.insights.len(), 7);

    let catalog = PatternCatalog::standard();
    let mut expected: Vec<String> = Vec::new();
    let all = Domain::ALL
        .iter()
        .flat_map(|d| catalog.suggestions(*d).iter().cloned())
        .chain([
            LATE_PURPOSE_RECOMMENDATION.to_string(),
            NO_SCAFFOLD_RECOMMENDATION.to_string(),
        ]);
    for rec in all {
        if !expected.contains(&rec) {
            expected.push(rec);
        }
    }
    assert_eq!(result.recommendations, expected);
}

#[test]
fn test_numbered_outline_scores_structural() {
    let result = analyze("User: Here's my outline: 1. Intro 2. Body 3. Conclusion").unwrap();
    let structural = &result.scores.structural;
    assert!(structural.hits >= 1);
    assert!(structural.score >= 4);
    assert!(
        structural
            .evidence
            .iter()
            .any(|e| e.detector_id == "S.numbered_list")
    );
    assert!(result.stats.used_outline);
}

#[test]
fn test_early_purpose_suppresses_late_purpose_insight() {
    let result =
        analyze("User: My goal is to write a report for executives by Friday.\nAssistant: Sure.")
            .unwrap();
    assert!(result.scores.purpose.hits >= 1);
    assert!(result.stats.started_with_purpose);
    assert!(
        result
            .insights
            .iter()
            .all(|i| i.finding != LATE_PURPOSE_FINDING)
    );
    assert_eq!(result.stats.user_turns, 1);
    assert_eq!(result.stats.assistant_turns, 1);
}

#[test]
fn test_role_aliasing() {
    let turns = parse_transcript(&TranscriptInput::from("Human: hi\nAI: hello"));
    let pairs: Vec<(Role, &str)> = turns.iter().map(|t| (t.role, t.text.as_str())).collect();
    assert_eq!(pairs, vec![(Role::User, "hi"), (Role::Assistant, "hello")]);
}

#[test]
fn test_malformed_json_does_not_fail() {
    let result = analyze("[not valid json").unwrap();
    assert_eq!(result.stats.turns, 1);
    assert_eq!(result.stats.user_turns, 1);
    let turns = parse_transcript(&TranscriptInput::from("[not valid json"));
    assert_eq!(turns[0].text, "[not valid json");
}

#[test]
fn test_assistant_text_never_scores() {
    let result = analyze(
        "User: ok\nAssistant: Here is an outline for your audience. For example, in other words, fix and highlight.",
    )
    .unwrap();
    assert_eq!(result.scores.total, 0);
    // outline detection looks at every role
    assert!(result.stats.used_outline);
}

#[test]
fn test_rich_transcript_scores_high() {
    let result = analyze(SAMPLES[6]).unwrap();
    assert!(result.scores.human.hits >= 3);
    assert!(result.scores.editorial.hits >= 3);
    let evidence = &result.scores.editorial.evidence;
    assert!(evidence.iter().all(|e| e.turn_index == 2));
    assert!(result.insights.iter().all(|i| i.domain != Domain::Human));
}

#[test]
fn test_serialized_shape() {
    let result = analyze("User: My goal is a memo.").unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert!(value["scores"]["S"]["maxPatterns"].is_number());
    assert_eq!(value["scores"]["P"]["domain"], "P");
    assert_eq!(value["scores"]["P"]["evidence"][0]["detectorId"], "P.goal");
    assert_eq!(value["scores"]["P"]["evidence"][0]["turnIndex"], 0);
    assert!(value["stats"]["userShareOfWords"].is_number());
    assert_eq!(value["stats"]["startedWithPurpose"], true);
    assert_eq!(value["classification"], "Tool / Enhancer");

    let back: AnalysisResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}
