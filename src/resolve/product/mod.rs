//! Product resolver — the most safety-critical matcher in the pipeline.
//!
//! Per candidate: compatibility gates first (brand block, strength,
//! strict variants — any failure is a veto regardless of textual score),
//! then the scoring ladder. When the ladder produces nothing, staged
//! fallbacks run: base-name candidate search, reverse lookup over the
//! untruncated raw line, and finally an optional low-confidence floor
//! that prefers a reviewable guess over silence.

pub mod gates;
pub mod strategies;

use crate::config::ProductMatchConfig;
use crate::master::{MasterIndex, ProductView};
use crate::resolve::types::{
    rank_candidates, MatchSource, MatchStrategy, ProductMatch, ScoredCandidate,
};

#[cfg(feature = "debug_matcher")]
use log::debug;

/// Resolve a free-text product line against the master snapshot.
///
/// `raw_line` is the full untruncated reconstructed row, used by the
/// reverse-lookup fallback when name extraction truncated incorrectly.
pub fn resolve_product(
    line_text: &str,
    raw_line: Option<&str>,
    index: &MasterIndex,
    config: &ProductMatchConfig,
) -> ProductMatch {
    let query = ProductView::from_text(line_text);
    if index.products.is_empty() {
        return ProductMatch::none();
    }

    // Gate + ladder pass over every candidate.
    let mut scored: Vec<ScoredCandidate> = Vec::new();
    for (product, view) in index.products.iter().zip(&index.product_views) {
        if !passes_gates(&query, view) {
            continue;
        }
        if let Some((score, strategy)) = strategies::run_ladder(&query, view, config) {
            scored.push(ScoredCandidate {
                code: product.product_code.clone(),
                name: product.product_name.clone(),
                score,
                strategy,
            });
        }
    }

    if !scored.is_empty() {
        let ranked = rank_candidates(scored);
        let best = ranked[0].clone();
        let source = if best.strategy == MatchStrategy::Exact
            || best.strategy == MatchStrategy::WordSet
        {
            MatchSource::Exact
        } else {
            MatchSource::FuzzyAuto
        };
        #[cfg(feature = "debug_matcher")]
        debug!(
            "[MATCHER_CALIBRATION] resolve_product: ladder_accept | strategy={:?} score={:.2} code={}",
            best.strategy, best.score, best.code
        );
        return ProductMatch {
            source,
            confidence: best.score,
            matched: find_product(index, &best.code),
            candidates: ranked,
            low_confidence: false,
        };
    }

    if let Some(result) = candidate_search(&query, index, config) {
        return result;
    }
    if let Some(result) = reverse_lookup(raw_line, index, config) {
        return result;
    }
    if let Some(result) = low_confidence_floor(&query, index, config) {
        return result;
    }

    #[cfg(feature = "debug_matcher")]
    debug!(
        "[MATCHER_CALIBRATION] resolve_product: no_match | input={:?}",
        query.norm
    );
    ProductMatch::none()
}

/// All three vetoes; any failure removes the candidate entirely.
fn passes_gates(query: &ProductView, candidate: &ProductView) -> bool {
    if gates::brand_blocked(
        query.first_token.as_deref(),
        candidate.first_token.as_deref(),
    ) {
        return false;
    }
    if !gates::strengths_compatible(query.strength.as_ref(), candidate.strength.as_ref()) {
        return false;
    }
    gates::variants_compatible(&query.variants, &candidate.variants)
}

/// Fallback 1: group products sharing the input's base name and
/// auto-select the unique gate survivor; multiple survivors go to
/// manual selection.
fn candidate_search(
    query: &ProductView,
    index: &MasterIndex,
    config: &ProductMatchConfig,
) -> Option<ProductMatch> {
    if query.base.is_empty() {
        return None;
    }

    let mut survivors: Vec<ScoredCandidate> = Vec::new();
    for (product, view) in index.products.iter().zip(&index.product_views) {
        if view.base.is_empty() {
            continue;
        }
        let base_related = view.base == query.base
            || view.base.contains(query.base.as_str())
            || query.base.contains(view.base.as_str());
        if !base_related || !passes_gates(query, view) {
            continue;
        }
        survivors.push(ScoredCandidate {
            code: product.product_code.clone(),
            name: product.product_name.clone(),
            score: strsim::normalized_levenshtein(&query.norm, &view.norm),
            strategy: MatchStrategy::CandidateSearch,
        });
    }

    match survivors.len() {
        0 => None,
        1 => {
            let best = survivors[0].clone();
            #[cfg(feature = "debug_matcher")]
            debug!(
                "[MATCHER_CALIBRATION] resolve_product: candidate_search_unique | code={}",
                best.code
            );
            Some(ProductMatch {
                source: MatchSource::FuzzyAuto,
                confidence: config.candidate_search_confidence,
                matched: find_product(index, &best.code),
                candidates: survivors,
                low_confidence: false,
            })
        }
        _ => {
            #[cfg(feature = "debug_matcher")]
            debug!(
                "[MATCHER_CALIBRATION] resolve_product: candidate_search_ambiguous | survivors={}",
                survivors.len()
            );
            Some(ProductMatch::manual(rank_candidates(survivors)))
        }
    }
}

/// Fallback 2: scan the full raw line for any candidate's normalized
/// name as a literal substring. Recovers from over-truncated extraction
/// (an empty name guess included) but stays subject to the strength and
/// variant gates.
fn reverse_lookup(
    raw_line: Option<&str>,
    index: &MasterIndex,
    config: &ProductMatchConfig,
) -> Option<ProductMatch> {
    let raw = raw_line?;
    let raw_view = ProductView::from_text(raw);
    if raw_view.norm.is_empty() {
        return None;
    }

    let mut hits: Vec<ScoredCandidate> = Vec::new();
    for (product, view) in index.products.iter().zip(&index.product_views) {
        if view.norm.len() < config.min_containment_len {
            continue;
        }
        if !raw_view.norm.contains(view.norm.as_str()) {
            continue;
        }
        if !gates::strengths_compatible(raw_view.strength.as_ref(), view.strength.as_ref()) {
            continue;
        }
        // Variant gate holds on this path too: a raw line carrying SR
        // must never fall back to the plain product, and vice versa.
        if !gates::variants_compatible(&raw_view.variants, &view.variants) {
            continue;
        }
        hits.push(ScoredCandidate {
            code: product.product_code.clone(),
            name: product.product_name.clone(),
            // Longer matched names are more specific.
            score: view.norm.len() as f64 / raw_view.norm.len().max(1) as f64,
            strategy: MatchStrategy::ReverseLookup,
        });
    }

    if hits.is_empty() {
        return None;
    }
    let ranked = rank_candidates(hits);
    let best = ranked[0].clone();
    #[cfg(feature = "debug_matcher")]
    debug!(
        "[MATCHER_CALIBRATION] resolve_product: reverse_lookup | code={} name={:?}",
        best.code, best.name
    );
    Some(ProductMatch {
        source: MatchSource::ReverseLookup,
        confidence: config.reverse_lookup_confidence,
        matched: find_product(index, &best.code),
        candidates: ranked,
        low_confidence: false,
    })
}

/// Fallback 3: auto-select the best-scoring gate survivor above the
/// floor rather than returning nothing — a reviewable guess beats
/// silence, tagged low-confidence for downstream audit.
fn low_confidence_floor(
    query: &ProductView,
    index: &MasterIndex,
    config: &ProductMatchConfig,
) -> Option<ProductMatch> {
    let floor = config.low_confidence_floor?;

    let mut scored: Vec<ScoredCandidate> = Vec::new();
    for (product, view) in index.products.iter().zip(&index.product_views) {
        if !passes_gates(query, view) {
            continue;
        }
        let score = strsim::normalized_levenshtein(&query.norm, &view.norm);
        if score >= floor {
            scored.push(ScoredCandidate {
                code: product.product_code.clone(),
                name: product.product_name.clone(),
                score,
                strategy: MatchStrategy::LowConfidenceFloor,
            });
        }
    }

    if scored.is_empty() {
        return None;
    }
    let ranked = rank_candidates(scored);
    let best = ranked[0].clone();
    #[cfg(feature = "debug_matcher")]
    debug!(
        "[MATCHER_CALIBRATION] resolve_product: low_confidence_floor | score={:.2} code={}",
        best.score, best.code
    );
    Some(ProductMatch {
        source: MatchSource::FuzzyAuto,
        confidence: best.score,
        matched: find_product(index, &best.code),
        candidates: ranked,
        low_confidence: true,
    })
}

fn find_product(index: &MasterIndex, code: &str) -> Option<crate::master::MasterProduct> {
    index
        .products
        .iter()
        .find(|p| p.product_code == code)
        .cloned()
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
