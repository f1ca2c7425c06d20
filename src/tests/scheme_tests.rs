use super::*;

fn slab(min_qty: u32, free_qty: u32) -> SchemeSlab {
    SchemeSlab {
        min_qty,
        free_qty,
        scheme_percent: 0.0,
    }
}

fn scheme_for(product_code: &str, slabs: Vec<SchemeSlab>) -> Scheme {
    Scheme {
        product_code: product_code.to_string(),
        product_name: String::new(),
        division: None,
        applicable_customers: Vec::new(),
        slabs,
        is_active: true,
    }
}

fn standard_schemes() -> Vec<Scheme> {
    vec![scheme_for("P40", vec![slab(50, 5), slab(100, 12)])]
}

#[test]
fn test_applies_richest_reached_slab() {
    let result = apply_scheme("P40", 80, "", "", "", &standard_schemes());
    assert!(result.scheme_applied);
    assert_eq!(result.free_qty, Some(5));
    assert_eq!(result.scheme_percent, Some(6.25));
    assert_eq!(result.applied_slab.unwrap().min_qty, 50);
}

#[test]
fn test_higher_slab_at_threshold() {
    let result = apply_scheme("P40", 100, "", "", "", &standard_schemes());
    assert_eq!(result.free_qty, Some(12));
    assert_eq!(result.scheme_percent, Some(12.0));
}

#[test]
fn test_below_lowest_slab_not_applied() {
    let result = apply_scheme("P40", 49, "", "", "", &standard_schemes());
    assert!(!result.scheme_applied);
    assert!(result.free_qty.is_none());
}

#[test]
fn test_zero_quantity_not_applied() {
    let result = apply_scheme("P40", 0, "", "", "", &standard_schemes());
    assert!(!result.scheme_applied);
}

#[test]
fn test_inactive_scheme_skipped() {
    let mut schemes = standard_schemes();
    schemes[0].is_active = false;
    assert!(!apply_scheme("P40", 80, "", "", "", &schemes).scheme_applied);
}

#[test]
fn test_customer_restriction() {
    let mut schemes = standard_schemes();
    schemes[0].applicable_customers = vec!["C1".to_string()];

    assert!(!apply_scheme("P40", 80, "", "", "C2", &schemes).scheme_applied);
    // Customer codes compare case-insensitively.
    assert!(apply_scheme("P40", 80, "", "", "c1", &schemes).scheme_applied);
}

#[test]
fn test_division_restriction() {
    let mut schemes = standard_schemes();
    schemes[0].division = Some("CARDIO".to_string());

    assert!(!apply_scheme("P40", 80, "", "DERMA", "", &schemes).scheme_applied);
    assert!(apply_scheme("P40", 80, "", "cardio", "", &schemes).scheme_applied);
    // An empty division restriction means unrestricted.
    schemes[0].division = Some(String::new());
    assert!(apply_scheme("P40", 80, "", "DERMA", "", &schemes).scheme_applied);
}

#[test]
fn test_matches_by_name_when_code_unknown() {
    let mut schemes = standard_schemes();
    schemes[0].product_code = String::new();
    schemes[0].product_name = "ARBITEL 40MG".to_string();

    let result = apply_scheme("UNKNOWN", 80, "1 arbitel 40mg 15'S", "", "", &schemes);
    assert!(result.scheme_applied);
}

#[test]
fn test_upsell_suggested_within_gap_limits() {
    let upsell = find_upsell_opportunity(
        "P40",
        80,
        "",
        "",
        "",
        &standard_schemes(),
        &SchemeConfig::default(),
    )
    .unwrap();
    assert_eq!(upsell.target_qty, 100);
    assert_eq!(upsell.additional_qty, 20);
    assert_eq!(upsell.slab.free_qty, 12);
}

#[test]
fn test_upsell_not_suggested_for_wide_gap() {
    let schemes = vec![scheme_for("P40", vec![slab(100, 12)])];
    // 70 more units is past both the ratio and the absolute cap.
    assert!(find_upsell_opportunity("P40", 30, "", "", "", &schemes, &SchemeConfig::default())
        .is_none());
}

#[test]
fn test_upsell_falls_through_topped_out_scheme() {
    // The first applicable scheme has no tier left above the order; a
    // later scheme still gets considered.
    let schemes = vec![
        scheme_for("P40", vec![slab(10, 1)]),
        scheme_for("P40", vec![slab(100, 12)]),
    ];
    let upsell =
        find_upsell_opportunity("P40", 80, "", "", "", &schemes, &SchemeConfig::default())
            .unwrap();
    assert_eq!(upsell.target_qty, 100);
    assert_eq!(upsell.additional_qty, 20);
}

#[test]
fn test_upsell_none_above_highest_slab() {
    assert!(find_upsell_opportunity(
        "P40",
        150,
        "",
        "",
        "",
        &standard_schemes(),
        &SchemeConfig::default()
    )
    .is_none());
}

#[test]
fn test_upsell_none_for_zero_quantity() {
    assert!(find_upsell_opportunity(
        "P40",
        0,
        "",
        "",
        "",
        &standard_schemes(),
        &SchemeConfig::default()
    )
    .is_none());
}

#[test]
fn test_unrelated_product_not_applied() {
    assert!(!apply_scheme("P99", 80, "", "", "", &standard_schemes()).scheme_applied);
}
