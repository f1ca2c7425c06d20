//! Scoring strategies for the product resolver.
//!
//! The ladder is an ordered list of pure functions
//! `(query, candidate) -> Option<score>`, evaluated with short-circuit
//! reduction: per candidate, the first strategy returning a score wins.
//! New heuristics slot into the list without touching existing ones.

use crate::config::ProductMatchConfig;
use crate::master::ProductView;
use crate::resolve::types::MatchStrategy;

pub(crate) type StrategyFn = fn(&ProductView, &ProductView, &ProductMatchConfig) -> Option<f64>;

/// Highest-priority first; order is the contract, not the scores.
pub(crate) const LADDER: &[(MatchStrategy, StrategyFn)] = &[
    (MatchStrategy::Exact, exact),
    (MatchStrategy::WordSet, word_set),
    (MatchStrategy::NearExact, near_exact),
    (MatchStrategy::Cleaned, cleaned),
    (MatchStrategy::BaseStrength, base_strength),
    (MatchStrategy::FormAware, form_aware),
    (MatchStrategy::Contains, contains),
];

/// Run the ladder for one candidate; first hit wins.
pub(crate) fn run_ladder(
    query: &ProductView,
    candidate: &ProductView,
    config: &ProductMatchConfig,
) -> Option<(f64, MatchStrategy)> {
    LADDER
        .iter()
        .find_map(|(strategy, f)| f(query, candidate, config).map(|score| (score, *strategy)))
}

/// Exact normalized match.
fn exact(query: &ProductView, candidate: &ProductView, _: &ProductMatchConfig) -> Option<f64> {
    (!query.norm.is_empty() && query.norm == candidate.norm).then_some(1.0)
}

/// Order-independent word-set match tolerates reordered tokens
/// ("40MG ARBITEL" vs "ARBITEL 40MG").
fn word_set(query: &ProductView, candidate: &ProductView, _: &ProductMatchConfig) -> Option<f64> {
    (!query.word_set.is_empty() && query.word_set == candidate.word_set).then_some(1.0)
}

/// Containment within a small length delta is as good as exact; a larger
/// delta still scores near-certain.
fn near_exact(
    query: &ProductView,
    candidate: &ProductView,
    config: &ProductMatchConfig,
) -> Option<f64> {
    let (short, long) = if query.norm.len() <= candidate.norm.len() {
        (&query.norm, &candidate.norm)
    } else {
        (&candidate.norm, &query.norm)
    };
    if short.is_empty() || !long.contains(short.as_str()) {
        return None;
    }
    let delta = long.len() - short.len();
    if delta <= config.near_exact_delta {
        Some(1.0)
    } else if delta <= config.close_delta {
        Some(0.95)
    } else {
        None
    }
}

/// Base name plus explicit strength both agree after cleaning.
fn cleaned(query: &ProductView, candidate: &ProductView, _: &ProductMatchConfig) -> Option<f64> {
    (!query.base.is_empty()
        && query.base == candidate.base
        && query.strength.is_some()
        && query.strength == candidate.strength)
        .then_some(0.90)
}

/// Strengths agree and base names match exactly (0.80) or by
/// containment (0.75).
fn base_strength(
    query: &ProductView,
    candidate: &ProductView,
    _: &ProductMatchConfig,
) -> Option<f64> {
    if query.strength.is_none() || query.strength != candidate.strength {
        return None;
    }
    if query.base.is_empty() || candidate.base.is_empty() {
        return None;
    }
    if query.base == candidate.base {
        Some(0.80)
    } else if query.base.contains(candidate.base.as_str())
        || candidate.base.contains(query.base.as_str())
    {
        Some(0.75)
    } else {
        None
    }
}

/// Dosage-form keywords agree (after abbreviation repair) and one base
/// name contains the other.
fn form_aware(query: &ProductView, candidate: &ProductView, _: &ProductMatchConfig) -> Option<f64> {
    let (Some(query_form), Some(candidate_form)) = (query.form, candidate.form) else {
        return None;
    };
    if query_form != candidate_form {
        return None;
    }
    if query.base.is_empty() || candidate.base.is_empty() {
        return None;
    }
    (query.base.contains(candidate.base.as_str()) || candidate.base.contains(query.base.as_str()))
        .then_some(0.88)
}

/// Substring containment of normalized names, both long enough to make
/// coincidence unlikely. Still gated by strength compatibility upstream.
fn contains(
    query: &ProductView,
    candidate: &ProductView,
    config: &ProductMatchConfig,
) -> Option<f64> {
    if query.norm.len() < config.min_containment_len
        || candidate.norm.len() < config.min_containment_len
    {
        return None;
    }
    (query.norm.contains(candidate.norm.as_str()) || candidate.norm.contains(query.norm.as_str()))
        .then_some(0.55)
}

#[cfg(test)]
#[path = "tests/strategies_tests.rs"]
mod tests;
