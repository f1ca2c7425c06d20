use super::*;

fn candidate(code: &str, name: &str, score: f64) -> ScoredCandidate {
    ScoredCandidate {
        code: code.to_string(),
        name: name.to_string(),
        score,
        strategy: MatchStrategy::Fuzzy,
    }
}

#[test]
fn test_sort_is_deterministic() {
    let mut candidates = vec![
        candidate("C3", "BETA", 0.5),
        candidate("C1", "ALPHA", 0.9),
        candidate("C2", "ALPHA", 0.9),
    ];
    sort_candidates_deterministic(&mut candidates);
    assert_eq!(candidates[0].code, "C1");
    assert_eq!(candidates[1].code, "C2");
    assert_eq!(candidates[2].code, "C3");
}

#[test]
fn test_rank_caps_at_top_five() {
    let candidates: Vec<ScoredCandidate> = (0..8)
        .map(|i| candidate(&format!("C{i}"), &format!("NAME{i}"), i as f64 / 10.0))
        .collect();
    let ranked = rank_candidates(candidates);
    assert_eq!(ranked.len(), MAX_CANDIDATES);
    assert_eq!(ranked[0].code, "C7");
}

#[test]
fn test_manual_result_carries_no_match() {
    let result = CustomerMatch::manual(vec![candidate("C1", "ALPHA", 0.6)]);
    assert_eq!(result.source, MatchSource::ManualRequired);
    assert!(result.matched.is_none());
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn test_none_results_are_empty() {
    let customer = CustomerMatch::none();
    assert_eq!(customer.source, MatchSource::None);
    assert!(customer.candidates.is_empty());

    let product = ProductMatch::none();
    assert_eq!(product.source, MatchSource::None);
    assert!(!product.low_confidence);
}

#[test]
fn test_match_source_display() {
    assert_eq!(MatchSource::Exact.to_string(), "Exact");
    assert_eq!(MatchSource::ManualRequired.to_string(), "ManualRequired");
}
