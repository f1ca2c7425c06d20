//! Tunable constants for every pipeline stage.
//!
//! The heuristics in this crate were calibrated empirically against real
//! scanned orders; every threshold that moved between calibration rounds
//! is a named field here rather than a literal buried in matching code.

use crate::types::{PipelineError, PipelineResult};

/// Configuration for the row reconstructor.
#[derive(Debug, Clone)]
pub struct RowConfig {
    /// Maximum vertical distance (page position units) between tokens of
    /// the same logical row. Scanned DPI varies, so this must be tunable.
    pub y_tolerance: f32,
    /// Horizontal gap beyond which an extra separator is inserted to
    /// preserve visual column structure.
    pub wide_gap_threshold: f32,
    /// Reconstructed rows shorter than this are dropped as noise.
    pub min_row_chars: usize,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            y_tolerance: 1.8,
            wide_gap_threshold: 18.0,
            min_row_chars: 4,
        }
    }
}

/// Configuration for quantity extraction.
#[derive(Debug, Clone)]
pub struct QuantityConfig {
    /// Smallest value accepted as an order quantity.
    pub min_qty: u32,
    /// Largest value accepted by the label/smart-scan paths.
    pub max_qty: u32,
    /// Upper bound for the amount-anchored permissive mode.
    pub max_qty_permissive: u32,
}

impl Default for QuantityConfig {
    fn default() -> Self {
        Self {
            min_qty: 1,
            max_qty: 9999,
            max_qty_permissive: 99999,
        }
    }
}

/// Configuration for the customer resolver.
#[derive(Debug, Clone)]
pub struct CustomerMatchConfig {
    /// Minimum best score for an unattended fuzzy accept.
    /// Lowered from 0.75 to tolerate spacing variants.
    pub auto_accept_threshold: f64,
    /// Minimum gap between best and second-best before a fuzzy match is
    /// trusted without review. Two similarly-named customers must route
    /// to a human, never to a silent best-guess.
    pub auto_accept_margin: f64,
    /// Bonus when the first significant word matches exactly.
    pub first_word_bonus: f64,
    /// Score ceiling for bonus-boosted candidates that are not identical.
    pub bonus_cap: f64,
}

impl Default for CustomerMatchConfig {
    fn default() -> Self {
        Self {
            auto_accept_threshold: 0.70,
            auto_accept_margin: 0.10,
            first_word_bonus: 0.35,
            bonus_cap: 0.98,
        }
    }
}

/// Configuration for the product resolver.
#[derive(Debug, Clone)]
pub struct ProductMatchConfig {
    /// Auto-select the best gate-passing candidate when its score reaches
    /// this floor even though no ladder strategy fired. `None` disables
    /// the floor and such lines fall through to no-match.
    pub low_confidence_floor: Option<f64>,
    /// Confidence assigned when the base-name candidate search leaves a
    /// unique gate survivor.
    pub candidate_search_confidence: f64,
    /// Confidence assigned to reverse-lookup matches.
    pub reverse_lookup_confidence: f64,
    /// Minimum normalized length for substring-containment scoring.
    pub min_containment_len: usize,
    /// Length delta treated as near-exact (score 1.0).
    pub near_exact_delta: usize,
    /// Length delta treated as close (score 0.95).
    pub close_delta: usize,
}

impl Default for ProductMatchConfig {
    fn default() -> Self {
        Self {
            low_confidence_floor: Some(0.20),
            candidate_search_confidence: 0.60,
            reverse_lookup_confidence: 0.85,
            min_containment_len: 6,
            near_exact_delta: 3,
            close_delta: 8,
        }
    }
}

/// Configuration for upsell suggestions in the scheme evaluator.
#[derive(Debug, Clone)]
pub struct SchemeConfig {
    /// Suggest the next slab when the incremental quantity needed is at
    /// most this fraction of the current order.
    pub upsell_max_gap_ratio: f64,
    /// ... or at most this many absolute units.
    pub upsell_max_gap_units: u32,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            upsell_max_gap_ratio: 0.5,
            upsell_max_gap_units: 50,
        }
    }
}

/// Aggregate configuration for a full document run.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub row: RowConfig,
    pub quantity: QuantityConfig,
    pub customer: CustomerMatchConfig,
    pub product: ProductMatchConfig,
    pub scheme: SchemeConfig,
}

impl PipelineConfig {
    /// Reject configurations that would make the pipeline degenerate.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.row.y_tolerance <= 0.0 {
            return Err(PipelineError::Config(
                "row.y_tolerance must be positive".to_string(),
            ));
        }
        if self.quantity.min_qty == 0 || self.quantity.min_qty > self.quantity.max_qty {
            return Err(PipelineError::Config(
                "quantity bounds must satisfy 1 <= min_qty <= max_qty".to_string(),
            ));
        }
        if self.customer.auto_accept_threshold <= 0.0 || self.customer.auto_accept_threshold > 1.0 {
            return Err(PipelineError::Config(
                "customer.auto_accept_threshold must be in (0, 1]".to_string(),
            ));
        }
        if let Some(floor) = self.product.low_confidence_floor {
            if !(0.0..=1.0).contains(&floor) {
                return Err(PipelineError::Config(
                    "product.low_confidence_floor must be in [0, 1]".to_string(),
                ));
            }
        }
        Ok(())
    }
}
