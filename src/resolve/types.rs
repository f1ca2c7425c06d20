//! Result types shared by the customer and product resolvers.
//!
//! Match results are values, produced fresh per resolution call and
//! never mutated afterward.

use serde::{Deserialize, Serialize};

use crate::master::{MasterCustomer, MasterProduct};

/// How a match was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSource {
    /// Normalized names equal; confidence is always 1.
    Exact,
    /// Fuzzy score cleared the auto-accept threshold and margin.
    FuzzyAuto,
    /// Ambiguous; top candidates attached for operator disambiguation.
    ManualRequired,
    /// No viable candidate at all.
    None,
    /// Candidate name found as a literal substring of the raw line.
    ReverseLookup,
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchSource::Exact => write!(f, "Exact"),
            MatchSource::FuzzyAuto => write!(f, "FuzzyAuto"),
            MatchSource::ManualRequired => write!(f, "ManualRequired"),
            MatchSource::None => write!(f, "None"),
            MatchSource::ReverseLookup => write!(f, "ReverseLookup"),
        }
    }
}

/// Which strategy produced a candidate's score. Kept on the candidate so
/// review output explains itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrategy {
    Exact,
    WordSet,
    NearExact,
    Cleaned,
    BaseStrength,
    FormAware,
    Contains,
    Fuzzy,
    CandidateSearch,
    ReverseLookup,
    LowConfidenceFloor,
}

/// A scored master-data candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub code: String,
    pub name: String,
    pub score: f64,
    pub strategy: MatchStrategy,
}

/// Candidate lists are capped to bound UI/debug payloads.
pub const MAX_CANDIDATES: usize = 5;

/// Sort candidates deterministically: score desc → name asc → code asc.
pub fn sort_candidates_deterministic(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.code.cmp(&b.code))
    });
}

/// Sort and cap to the top-5.
pub fn rank_candidates(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    sort_candidates_deterministic(&mut candidates);
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

/// Resolution result for a free-text customer name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerMatch {
    pub source: MatchSource,
    /// Always in `[0, 1]`; 1 for exact matches.
    pub confidence: f64,
    /// Sorted descending, capped at 5.
    pub candidates: Vec<ScoredCandidate>,
    /// `None` whenever `source` is `ManualRequired` or `None`.
    pub matched: Option<MasterCustomer>,
}

impl CustomerMatch {
    pub fn none() -> Self {
        Self {
            source: MatchSource::None,
            confidence: 0.0,
            candidates: Vec::new(),
            matched: None,
        }
    }

    pub fn manual(candidates: Vec<ScoredCandidate>) -> Self {
        Self {
            source: MatchSource::ManualRequired,
            confidence: 0.0,
            candidates,
            matched: None,
        }
    }
}

/// Resolution result for a free-text product line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMatch {
    pub source: MatchSource,
    pub confidence: f64,
    pub candidates: Vec<ScoredCandidate>,
    pub matched: Option<MasterProduct>,
    /// Set when the low-confidence floor auto-selected a reviewable
    /// guess below the normal strategy scores; audit flags these rows.
    pub low_confidence: bool,
}

impl ProductMatch {
    pub fn none() -> Self {
        Self {
            source: MatchSource::None,
            confidence: 0.0,
            candidates: Vec::new(),
            matched: None,
            low_confidence: false,
        }
    }

    pub fn manual(candidates: Vec<ScoredCandidate>) -> Self {
        Self {
            source: MatchSource::ManualRequired,
            confidence: 0.0,
            candidates,
            matched: None,
            low_confidence: false,
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
