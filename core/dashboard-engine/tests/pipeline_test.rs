//! FILENAME: tests/pipeline_test.rs
//! Integration tests for the full filter-and-aggregate pipeline.

use dashboard_engine::{
    apply_filters, DashboardView, FilterField, FilterSelection,
};
use model::{FieldValue, Record};

// ============================================================================
// FIXTURES
// ============================================================================

/// A small registry spanning two regions, three cancer types, and a few
/// deliberate holes (missing stage, cost, survival).
fn registry() -> Vec<Record> {
    let rows: Vec<(&str, &str, &str, Option<&str>, i32, f64, &str, Option<f64>, Option<f64>)> = vec![
        // id, region, type, stage, year, age, gender, cost, survival
        ("P01", "Asia", "Lung", Some("I"), 2019, 54.0, "M", Some(22_000.0), Some(3.1)),
        ("P02", "Asia", "Lung", Some("II"), 2019, 61.0, "F", Some(31_000.0), Some(2.4)),
        ("P03", "Asia", "Skin", Some("I"), 2020, 47.0, "F", Some(8_000.0), Some(7.9)),
        ("P04", "Europe", "Lung", Some("III"), 2020, 66.0, "M", None, Some(1.2)),
        ("P05", "Europe", "Breast", Some("II"), 2021, 58.0, "F", Some(27_000.0), None),
        ("P06", "Europe", "Breast", None, 2021, 49.0, "F", Some(25_000.0), Some(5.5)),
        ("P07", "Asia", "Skin", Some("I"), 2021, 39.0, "M", Some(9_500.0), Some(8.3)),
    ];

    rows.into_iter()
        .map(|(id, region, cancer, stage, year, age, gender, cost, survival)| {
            let mut r = Record::new(id);
            r.country_region = Some(region.to_string());
            r.cancer_type = Some(cancer.to_string());
            r.cancer_stage = stage.map(str::to_string);
            r.year = Some(year);
            r.age = Some(age);
            r.gender = Some(gender.to_string());
            r.treatment_cost_usd = cost;
            r.survival_years = survival;
            r
        })
        .collect()
}

fn ids<'a>(subset: &[&'a Record]) -> Vec<&'a str> {
    subset.iter().map(|r| r.patient_id.as_str()).collect()
}

// ============================================================================
// FILTER PROPERTIES
// ============================================================================

#[test]
fn filtered_subset_is_an_order_preserving_subsequence() {
    let records = registry();
    let selection = FilterSelection::from_raw(vec![("region", "Asia")]);
    let subset = apply_filters(&records, &selection);

    assert_eq!(ids(&subset), vec!["P01", "P02", "P03", "P07"]);
    for record in &subset {
        assert!(selection.matches(record));
    }
}

#[test]
fn empty_selection_returns_the_full_set() {
    let records = registry();
    let subset = apply_filters(&records, &FilterSelection::new());
    assert_eq!(subset.len(), records.len());
}

#[test]
fn filtering_does_not_mutate_the_record_set() {
    let records = registry();
    let before = records.clone();
    let selection = FilterSelection::from_raw(vec![("year", "2020"), ("gender", "F")]);
    let _ = apply_filters(&records, &selection);
    assert_eq!(records, before);
}

// ============================================================================
// AGGREGATE CONSISTENCY
// ============================================================================

#[test]
fn all_views_reflect_the_same_subset_size() {
    let records = registry();
    let selection = FilterSelection::from_raw(vec![("region", "Europe")]);
    let subset = apply_filters(&records, &selection);
    let view = DashboardView::build(&subset);

    let n = subset.len() as u64;
    assert_eq!(view.table.rows.len() as u64, n);
    assert_eq!(view.patients_by_region.total(), n);
    assert_eq!(view.cases_by_cancer_type.total(), n);
    assert_eq!(view.patients_by_gender.total(), n);
    assert_eq!(view.cost_vs_survival.points.len() as u64, n);

    let cross_total: u64 = view
        .stage_by_type
        .counts
        .iter()
        .flat_map(|row| row.iter())
        .sum();
    assert_eq!(cross_total, n);
}

#[test]
fn grouped_averages_use_strict_null_exclusion() {
    let records = registry();
    let subset = apply_filters(&records, &FilterSelection::new());
    let view = DashboardView::build(&subset);

    // 2020: P03 costs 8000, P04 has no cost. Mean must be 8000, not 4000.
    assert_eq!(view.cost_by_year.get("2020"), Some(8_000.0));

    // 2021: survival 5.5 and 8.3 (P05 has none). Mean over the two present.
    let survival_2021 = view.survival_by_year.get("2021").unwrap();
    assert!((survival_2021 - 6.9).abs() < 1e-9);
}

#[test]
fn cross_tab_marginals_match_categorical_counts() {
    let records = registry();
    let subset = apply_filters(&records, &FilterSelection::new());
    let view = DashboardView::build(&subset);

    let by_type = &view.cases_by_cancer_type;
    for label in &view.stage_by_type.outer_labels {
        assert_eq!(
            Some(view.stage_by_type.outer_total(label)),
            by_type.get(label),
            "outer marginal mismatch for {label}"
        );
    }

    // P06 has no stage: the inner axis carries a (blank) slot.
    assert_eq!(view.stage_by_type.get("Breast", "(blank)"), 1);
}

#[test]
fn year_labels_sort_numerically() {
    let records = registry();
    let subset = apply_filters(&records, &FilterSelection::new());
    let view = DashboardView::build(&subset);
    assert_eq!(view.cost_by_year.labels, vec!["2019", "2020", "2021"]);
}

// ============================================================================
// WHOLE-PIPELINE PROPERTIES
// ============================================================================

#[test]
fn pipeline_is_idempotent() {
    let records = registry();
    let selection = FilterSelection::new()
        .with(FilterField::Region, FieldValue::Text("Asia".to_string()))
        .with(FilterField::Year, FieldValue::Number(2019.0));

    let first = DashboardView::for_records(&records, &selection);
    let second = DashboardView::for_records(&records, &selection);
    assert_eq!(first, second);
}

#[test]
fn selection_matching_nothing_yields_the_empty_view() {
    let records = registry();
    let selection = FilterSelection::from_raw(vec![("region", "Atlantis")]);
    let view = DashboardView::for_records(&records, &selection);

    assert!(view.table.rows.is_empty());
    assert!(view.patients_by_region.is_empty());
    assert!(view.severity_by_stage.is_empty());
    assert!(view.stage_by_type.is_empty());
    assert_eq!(view.risk_profile.means, vec![0.0; 4]);
}
