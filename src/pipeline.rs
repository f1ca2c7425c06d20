//! Document pipeline — wires row reconstruction, extraction, resolution
//! and scheme evaluation together.
//!
//! Each row is processed independently; a row that fails to extract or
//! resolve becomes a review-marked line, never an abort of its siblings.
//! Master snapshots are immutable for the batch, so the rayon fan-out
//! needs no locking.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::extract::{self, ExtractedLineItem};
use crate::master::MasterIndex;
use crate::resolve::{self, CustomerMatch, MatchSource, ProductMatch};
use crate::rows::{self, LogicalRow, PositionedToken};
use crate::scheme::{self, SchemeApplication, UpsellSuggestion};

/// One fully processed order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLine {
    pub raw_text: String,
    pub quantity: Option<u32>,
    pub product_name_guess: String,
    pub product: ProductMatch,
    pub scheme: Option<SchemeApplication>,
    pub upsell: Option<UpsellSuggestion>,
}

impl ResolvedLine {
    /// A line is review-worthy when anything about it needs a human:
    /// missing quantity, ambiguous product, or a low-confidence guess.
    pub fn needs_review(&self) -> bool {
        self.quantity.is_none()
            || self.product.low_confidence
            || matches!(
                self.product.source,
                MatchSource::ManualRequired | MatchSource::None
            )
    }
}

/// Row counts for the reporting collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub total_rows: usize,
    pub auto_matched: usize,
    pub needs_review: usize,
    pub unmatched: usize,
}

/// Full pipeline output for one document, serializable for the
/// report/audit collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    pub customer: CustomerMatch,
    pub lines: Vec<ResolvedLine>,
    pub summary: DocumentSummary,
}

/// Run the full pipeline over one document's positioned tokens.
///
/// The customer is resolved once from the caller-supplied header text
/// (orders carry one customer per document); rows share the result.
pub fn process_document(
    tokens: &[PositionedToken],
    customer_text: &str,
    index: &MasterIndex,
    config: &PipelineConfig,
) -> DocumentResult {
    let logical_rows = rows::reconstruct_rows(tokens, &config.row);
    let customer = resolve::resolve_customer(customer_text, index, &config.customer);
    let lines = process_rows(&logical_rows, &customer, index, config);
    let summary = summarize(&lines);

    log::debug!(
        "processed document: {} rows, {} auto, {} review, {} unmatched",
        summary.total_rows,
        summary.auto_matched,
        summary.needs_review,
        summary.unmatched
    );

    DocumentResult {
        customer,
        lines,
        summary,
    }
}

/// Serial row processing.
pub fn process_rows(
    logical_rows: &[LogicalRow],
    customer: &CustomerMatch,
    index: &MasterIndex,
    config: &PipelineConfig,
) -> Vec<ResolvedLine> {
    logical_rows
        .iter()
        .map(|row| process_row(row, customer, index, config))
        .collect()
}

/// Parallel fan-out over rows. Safe: rows are independent and the master
/// snapshot is read-only.
pub fn process_rows_parallel(
    logical_rows: &[LogicalRow],
    customer: &CustomerMatch,
    index: &MasterIndex,
    config: &PipelineConfig,
) -> Vec<ResolvedLine> {
    logical_rows
        .par_iter()
        .map(|row| process_row(row, customer, index, config))
        .collect()
}

fn process_row(
    row: &LogicalRow,
    customer: &CustomerMatch,
    index: &MasterIndex,
    config: &PipelineConfig,
) -> ResolvedLine {
    let ExtractedLineItem {
        raw_text,
        quantity,
        product_name_guess,
    } = extract::extract_line_item(row.raw_text(), &config.quantity);

    let product = resolve::resolve_product(
        &product_name_guess,
        Some(&raw_text),
        index,
        &config.product,
    );

    let (scheme, upsell) = evaluate_scheme(&product, quantity, &raw_text, customer, index, config);

    ResolvedLine {
        raw_text,
        quantity,
        product_name_guess,
        product,
        scheme,
        upsell,
    }
}

/// Schemes only make sense for a resolved product with a known quantity.
fn evaluate_scheme(
    product: &ProductMatch,
    quantity: Option<u32>,
    raw_text: &str,
    customer: &CustomerMatch,
    index: &MasterIndex,
    config: &PipelineConfig,
) -> (Option<SchemeApplication>, Option<UpsellSuggestion>) {
    let (Some(matched), Some(qty)) = (&product.matched, quantity) else {
        return (None, None);
    };
    let customer_code = customer
        .matched
        .as_ref()
        .map(|c| c.customer_code.as_str())
        .unwrap_or("");

    let application = scheme::apply_scheme(
        &matched.product_code,
        qty,
        raw_text,
        &matched.division,
        customer_code,
        &index.schemes,
    );
    let upsell = scheme::find_upsell_opportunity(
        &matched.product_code,
        qty,
        raw_text,
        &matched.division,
        customer_code,
        &index.schemes,
        &config.scheme,
    );
    (Some(application), upsell)
}

fn summarize(lines: &[ResolvedLine]) -> DocumentSummary {
    let mut summary = DocumentSummary {
        total_rows: lines.len(),
        ..Default::default()
    };
    for line in lines {
        match line.product.source {
            MatchSource::Exact | MatchSource::FuzzyAuto | MatchSource::ReverseLookup => {
                if line.needs_review() {
                    summary.needs_review += 1;
                } else {
                    summary.auto_matched += 1;
                }
            }
            MatchSource::ManualRequired => summary.needs_review += 1,
            MatchSource::None => summary.unmatched += 1,
        }
    }
    summary
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
