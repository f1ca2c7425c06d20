//! Customer resolver — staged exact/fuzzy matching with a two-tier
//! auto-accept policy.
//!
//! **Algorithm:**
//! 1. Normalize (prefix/suffix strip, punctuation collapse)
//! 2. Exact pass: any candidate whose normalized name equals the input
//!    returns `Exact` with confidence 1, no scoring
//! 3. Fuzzy score = max(word-overlap ratio, character-sequence score),
//!    with a first-significant-word bonus
//! 4. Auto-accept only when the best score clears the threshold AND the
//!    margin over the runner-up is wide enough — two similarly-named
//!    customers must route to a human

use std::collections::BTreeSet;

use crate::config::CustomerMatchConfig;
use crate::master::{MasterCustomer, MasterIndex};
use crate::normalize;
use crate::resolve::types::{
    rank_candidates, CustomerMatch, MatchSource, MatchStrategy, ScoredCandidate,
};

#[cfg(feature = "debug_matcher")]
use log::debug;

/// Resolve a free-text customer name against the master snapshot.
pub fn resolve_customer(
    free_text: &str,
    index: &MasterIndex,
    config: &CustomerMatchConfig,
) -> CustomerMatch {
    let input = normalize::normalize_customer(free_text);
    if input.is_empty() || index.customers.is_empty() {
        return CustomerMatch::none();
    }

    // Exact pass wins regardless of other candidates' scores.
    for (customer, norm) in index.customers.iter().zip(&index.customer_norms) {
        if *norm == input {
            return CustomerMatch {
                source: MatchSource::Exact,
                confidence: 1.0,
                candidates: vec![ScoredCandidate {
                    code: customer.customer_code.clone(),
                    name: customer.customer_name.clone(),
                    score: 1.0,
                    strategy: MatchStrategy::Exact,
                }],
                matched: Some(customer.clone()),
            };
        }
    }

    let input_words = normalize::word_set(&input);
    let mut scored: Vec<ScoredCandidate> = Vec::new();
    for (customer, norm) in index.customers.iter().zip(&index.customer_norms) {
        let score = fuzzy_score(&input, &input_words, norm, config);
        if score > 0.0 {
            scored.push(ScoredCandidate {
                code: customer.customer_code.clone(),
                name: customer.customer_name.clone(),
                score,
                strategy: MatchStrategy::Fuzzy,
            });
        }
    }

    if scored.is_empty() {
        return CustomerMatch::none();
    }

    let ranked = rank_candidates(scored);
    let best = ranked[0].clone();
    let second_score = ranked.get(1).map(|c| c.score).unwrap_or(0.0);
    let margin = best.score - second_score;

    if best.score >= config.auto_accept_threshold && margin >= config.auto_accept_margin {
        #[cfg(feature = "debug_matcher")]
        debug!(
            "[MATCHER_CALIBRATION] resolve_customer: fuzzy_accept | best={:.2} second={:.2} code={}",
            best.score, second_score, best.code
        );
        return CustomerMatch {
            source: MatchSource::FuzzyAuto,
            confidence: best.score,
            matched: find_customer(index, &best.code),
            candidates: ranked,
        };
    }

    #[cfg(feature = "debug_matcher")]
    debug!(
        "[MATCHER_CALIBRATION] resolve_customer: manual_review | best={:.2} margin={:.2}",
        best.score, margin
    );
    CustomerMatch::manual(ranked)
}

/// Fuzzy score for one candidate. Word overlap catches reordered or
/// partially transcribed names; the character-sequence score catches
/// spacing variants; the first-significant-word bonus rewards brand-name
/// agreement over generic suffix noise.
fn fuzzy_score(
    input: &str,
    input_words: &BTreeSet<String>,
    candidate: &str,
    config: &CustomerMatchConfig,
) -> f64 {
    if candidate.is_empty() {
        return 0.0;
    }

    let candidate_words = normalize::word_set(candidate);
    let word_score = word_overlap(input_words, &candidate_words);
    let char_score = char_sequence_score(input, candidate);
    let mut score = word_score.max(char_score);

    let first_matches = match (
        normalize::first_significant_word(input),
        normalize::first_significant_word(candidate),
    ) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    if first_matches {
        score += config.first_word_bonus;
        if input != candidate {
            score = score.min(config.bonus_cap);
        }
    }

    score.min(1.0)
}

/// Jaccard-style word overlap: shared words over the union.
fn word_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    shared / union
}

/// Character-sequence score: containment ratio when one name embeds the
/// other, otherwise normalized Levenshtein similarity.
fn char_sequence_score(a: &str, b: &str) -> f64 {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if !short.is_empty() && long.contains(short) {
        return short.len() as f64 / long.len() as f64;
    }
    strsim::normalized_levenshtein(a, b)
}

fn find_customer(index: &MasterIndex, code: &str) -> Option<MasterCustomer> {
    index
        .customers
        .iter()
        .find(|c| c.customer_code == code)
        .cloned()
}

#[cfg(test)]
#[path = "tests/customer_tests.rs"]
mod tests;
