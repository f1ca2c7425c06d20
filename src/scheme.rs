//! Scheme evaluator — finds the promotional slab an order qualifies for
//! and computes the free quantity / percentage.
//!
//! The eligible slab is the richest tier the order reaches (highest
//! `min_qty` not exceeding the order quantity). `scheme_percent` is
//! recomputed from the actual order quantity rather than trusted from
//! stored data, so the percentage always matches what ships.

use serde::{Deserialize, Serialize};

use crate::config::SchemeConfig;
use crate::master::{Scheme, SchemeSlab};
use crate::normalize;

/// Outcome of evaluating schemes for one resolved order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeApplication {
    pub scheme_applied: bool,
    pub free_qty: Option<u32>,
    /// `free_qty / order_qty * 100`, rounded to 2 decimals.
    pub scheme_percent: Option<f64>,
    pub applied_slab: Option<SchemeSlab>,
}

impl SchemeApplication {
    pub fn not_applied() -> Self {
        Self {
            scheme_applied: false,
            free_qty: None,
            scheme_percent: None,
            applied_slab: None,
        }
    }
}

/// A merchandising nudge toward the next slab, not a correctness
/// requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsellSuggestion {
    /// Quantity the buyer would need to order.
    pub target_qty: u32,
    /// Increment over the current order.
    pub additional_qty: u32,
    pub slab: SchemeSlab,
}

/// Find the applicable scheme slab for a resolved product/customer and
/// order quantity.
pub fn apply_scheme(
    product_code: &str,
    order_qty: u32,
    item_desc: &str,
    division: &str,
    customer_code: &str,
    schemes: &[Scheme],
) -> SchemeApplication {
    if order_qty == 0 {
        return SchemeApplication::not_applied();
    }

    for scheme in schemes {
        if !scheme_applies(scheme, product_code, item_desc, division, customer_code) {
            continue;
        }
        let Some(slab) = eligible_slab(&scheme.slabs, order_qty) else {
            continue;
        };
        let percent = round2(slab.free_qty as f64 / order_qty as f64 * 100.0);
        return SchemeApplication {
            scheme_applied: true,
            free_qty: Some(slab.free_qty),
            scheme_percent: Some(percent),
            applied_slab: Some(slab.clone()),
        };
    }

    SchemeApplication::not_applied()
}

/// Locate the next higher slab above the current quantity and suggest it
/// when the incremental quantity needed is small enough to be a
/// plausible nudge.
pub fn find_upsell_opportunity(
    product_code: &str,
    order_qty: u32,
    item_desc: &str,
    division: &str,
    customer_code: &str,
    schemes: &[Scheme],
    config: &SchemeConfig,
) -> Option<UpsellSuggestion> {
    if order_qty == 0 {
        return None;
    }

    for scheme in schemes {
        if !scheme_applies(scheme, product_code, item_desc, division, customer_code) {
            continue;
        }
        // Lowest tier strictly above the current quantity; a scheme the
        // order has already topped out still leaves later schemes in play.
        let Some(next) = scheme
            .slabs
            .iter()
            .filter(|slab| slab.min_qty > order_qty)
            .min_by_key(|slab| slab.min_qty)
        else {
            continue;
        };
        let additional = next.min_qty - order_qty;
        let within_ratio = additional as f64 <= order_qty as f64 * config.upsell_max_gap_ratio;
        let within_units = additional <= config.upsell_max_gap_units;
        if within_ratio || within_units {
            return Some(UpsellSuggestion {
                target_qty: next.min_qty,
                additional_qty: additional,
                slab: next.clone(),
            });
        }
        return None;
    }
    None
}

/// A scheme applies when active, the product matches by code or name,
/// and any customer/division restriction is satisfied.
fn scheme_applies(
    scheme: &Scheme,
    product_code: &str,
    item_desc: &str,
    division: &str,
    customer_code: &str,
) -> bool {
    if !scheme.is_active {
        return false;
    }

    let code_match =
        !scheme.product_code.is_empty() && scheme.product_code.eq_ignore_ascii_case(product_code);
    let name_match = !scheme.product_name.is_empty()
        && normalize::normalize_product(item_desc)
            .contains(normalize::normalize_product(&scheme.product_name).as_str());
    if !code_match && !name_match {
        return false;
    }

    if !scheme.applicable_customers.is_empty()
        && !scheme
            .applicable_customers
            .iter()
            .any(|c| c.eq_ignore_ascii_case(customer_code))
    {
        return false;
    }

    if let Some(scheme_division) = &scheme.division {
        if !scheme_division.is_empty() && !scheme_division.eq_ignore_ascii_case(division) {
            return false;
        }
    }

    true
}

/// Richest tier the order qualifies for.
fn eligible_slab(slabs: &[SchemeSlab], order_qty: u32) -> Option<&SchemeSlab> {
    slabs
        .iter()
        .filter(|slab| slab.min_qty <= order_qty)
        .max_by_key(|slab| slab.min_qty)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "tests/scheme_tests.rs"]
mod tests;
