//! FILENAME: core/dashboard-engine/src/aggregate.rs
//! Aggregation Engine - the summary computations behind every chart.
//!
//! All computations operate on the active subset only, allocate fresh output,
//! and share one grouped-reduction primitive so the null-handling rules live
//! in a single place:
//! - counts include null group keys under the `(blank)` pseudo-label, so the
//!   counts of any field always sum to the subset size
//! - averages exclude null numeric values from both sum and count; a group
//!   with no numeric values at all is omitted rather than reported as zero

use model::{FieldValue, Record, RecordField};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// The fixed field list behind the risk-factor profile, in display order.
pub const RISK_FACTOR_FIELDS: [RecordField; 4] = [
    RecordField::GeneticRisk,
    RecordField::Smoking,
    RecordField::AlcoholUse,
    RecordField::ObesityLevel,
];

// ============================================================================
// GROUPED REDUCTION
// ============================================================================

/// Running totals for one group of a reduction.
#[derive(Debug, Clone, Copy, Default)]
struct GroupSlot {
    /// Records that fell into this group, numeric value present or not.
    rows: u64,
    /// Sum over the present numeric values.
    sum: f64,
    /// How many records contributed to `sum`.
    numeric_rows: u64,
}

impl GroupSlot {
    fn add(&mut self, value: Option<f64>) {
        self.rows += 1;
        if let Some(v) = value {
            self.sum += v;
            self.numeric_rows += 1;
        }
    }

    /// Arithmetic mean over the present values; `None` when no value was.
    fn mean(&self) -> Option<f64> {
        if self.numeric_rows == 0 {
            None
        } else {
            Some(self.sum / self.numeric_rows as f64)
        }
    }
}

/// Single-pass grouped reduction: groups the subset by `key_field` and feeds
/// each record's extracted value into its group's slot. Returns the groups
/// sorted ascending by key.
fn group_reduce(
    subset: &[&Record],
    key_field: RecordField,
    value: impl Fn(&Record) -> Option<f64>,
) -> Vec<(FieldValue, GroupSlot)> {
    let mut slots: FxHashMap<FieldValue, GroupSlot> = FxHashMap::default();
    for &record in subset {
        slots
            .entry(record.value(key_field))
            .or_default()
            .add(value(record));
    }

    let mut groups: Vec<(FieldValue, GroupSlot)> = slots.into_iter().collect();
    groups.sort_by(|a, b| a.0.cmp(&b.0));
    groups
}

// ============================================================================
// CATEGORICAL COUNT
// ============================================================================

/// Occurrence counts per category label, labels sorted ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl CategoryCount {
    /// The count for one label, if present.
    pub fn get(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.counts[i])
    }

    /// Sum of all counts; always equals the size of the counted subset.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Counts the subset by one categorical field. Records with a missing value
/// are counted under `(blank)` rather than dropped.
pub fn count_by(subset: &[&Record], field: RecordField) -> CategoryCount {
    let groups = group_reduce(subset, field, |_| None);
    CategoryCount {
        labels: groups.iter().map(|(key, _)| key.label()).collect(),
        counts: groups.iter().map(|(_, slot)| slot.rows).collect(),
    }
}

// ============================================================================
// GROUPED AVERAGE
// ============================================================================

/// Per-group arithmetic means, labels sorted ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl CategorySeries {
    /// The value for one label, if present.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Groups the subset by `group_field` and averages `value_field` per group.
///
/// Records whose `value_field` is missing contribute to neither the sum nor
/// the divisor. Groups left with no values are omitted entirely.
pub fn average_by(
    subset: &[&Record],
    group_field: RecordField,
    value_field: RecordField,
) -> CategorySeries {
    let groups = group_reduce(subset, group_field, |record| {
        record.value(value_field).as_number()
    });

    let mut labels = Vec::with_capacity(groups.len());
    let mut values = Vec::with_capacity(groups.len());
    for (key, slot) in groups {
        if let Some(mean) = slot.mean() {
            labels.push(key.label());
            values.push(mean);
        }
    }
    CategorySeries { labels, values }
}

// ============================================================================
// RISK PROFILE
// ============================================================================

/// Global per-field means over a fixed field list, aligned to display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub labels: Vec<String>,
    pub means: Vec<f64>,
}

/// One mean per risk-factor field across the whole subset, missing values
/// excluded per field. The vector keeps its fixed length even for an empty
/// subset; a field with no values reports 0.0.
pub fn risk_profile(subset: &[&Record]) -> RiskProfile {
    let mut labels = Vec::with_capacity(RISK_FACTOR_FIELDS.len());
    let mut means = Vec::with_capacity(RISK_FACTOR_FIELDS.len());

    for field in RISK_FACTOR_FIELDS {
        let mut slot = GroupSlot::default();
        for record in subset {
            slot.add(record.value(field).as_number());
        }
        labels.push(field.title().to_string());
        means.push(slot.mean().unwrap_or(0.0));
    }

    RiskProfile { labels, means }
}

// ============================================================================
// CROSS-TABULATION
// ============================================================================

/// A 2-D count table over two categorical fields, both label axes sorted
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTab {
    pub outer_labels: Vec<String>,
    pub inner_labels: Vec<String>,
    /// `counts[i][j]` = records with outer label `i` and inner label `j`.
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    /// The count for one (outer, inner) label pair; 0 when either label is
    /// absent from its axis.
    pub fn get(&self, outer: &str, inner: &str) -> u64 {
        let i = self.outer_labels.iter().position(|l| l == outer);
        let j = self.inner_labels.iter().position(|l| l == inner);
        match (i, j) {
            (Some(i), Some(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    /// Total for one outer label across all inner labels.
    pub fn outer_total(&self, outer: &str) -> u64 {
        self.outer_labels
            .iter()
            .position(|l| l == outer)
            .map(|i| self.counts[i].iter().sum())
            .unwrap_or(0)
    }

    /// Total for one inner label across all outer labels.
    pub fn inner_total(&self, inner: &str) -> u64 {
        self.inner_labels
            .iter()
            .position(|l| l == inner)
            .map(|j| self.counts.iter().map(|row| row[j]).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.outer_labels.is_empty() && self.inner_labels.is_empty()
    }
}

/// Cross-tabulates the subset over two categorical fields.
///
/// Every record lands in exactly one cell; missing keys occupy a `(blank)`
/// slot on their axis, which keeps the row and column totals consistent with
/// [`count_by`] over the same fields.
pub fn cross_tab(
    subset: &[&Record],
    outer_field: RecordField,
    inner_field: RecordField,
) -> CrossTab {
    let outer_keys = sorted_keys(subset, outer_field);
    let inner_keys = sorted_keys(subset, inner_field);

    let outer_index: FxHashMap<&FieldValue, usize> =
        outer_keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let inner_index: FxHashMap<&FieldValue, usize> =
        inner_keys.iter().enumerate().map(|(i, k)| (k, i)).collect();

    let mut counts = vec![vec![0u64; inner_keys.len()]; outer_keys.len()];
    for record in subset {
        let i = outer_index[&record.value(outer_field)];
        let j = inner_index[&record.value(inner_field)];
        counts[i][j] += 1;
    }

    CrossTab {
        outer_labels: outer_keys.iter().map(|k| k.label()).collect(),
        inner_labels: inner_keys.iter().map(|k| k.label()).collect(),
        counts,
    }
}

/// Distinct group keys of a field within the subset, sorted ascending.
/// Unlike the catalog, missing values are kept (as `FieldValue::Empty`).
fn sorted_keys(subset: &[&Record], field: RecordField) -> Vec<FieldValue> {
    let mut seen = FxHashSet::default();
    let mut keys = Vec::new();
    for record in subset {
        let key = record.value(field);
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys.sort();
    keys
}

// ============================================================================
// POINT SERIES
// ============================================================================

/// One (x, y) pair per record, in subset order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSeries {
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Extracts one point per record from two numeric fields.
///
/// No null exclusion here, in contrast to the averaging computations: a
/// record with a missing coordinate still yields a point, and deciding what
/// to do with an unplottable point is the renderer's call.
pub fn point_series(
    subset: &[&Record],
    x_field: RecordField,
    y_field: RecordField,
) -> PointSeries {
    PointSeries {
        points: subset
            .iter()
            .map(|record| Point {
                x: record.value(x_field).as_number(),
                y: record.value(y_field).as_number(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: &str,
        cancer_type: Option<&str>,
        stage: Option<&str>,
        cost: Option<f64>,
    ) -> Record {
        let mut r = Record::new(id);
        r.cancer_type = cancer_type.map(str::to_string);
        r.cancer_stage = stage.map(str::to_string);
        r.treatment_cost_usd = cost;
        r
    }

    fn worked_example() -> Vec<Record> {
        vec![
            record("P1", Some("Lung"), Some("I"), Some(100.0)),
            record("P2", Some("Lung"), Some("I"), Some(300.0)),
            record("P3", Some("Skin"), Some("II"), None),
        ]
    }

    fn as_refs(records: &[Record]) -> Vec<&Record> {
        records.iter().collect()
    }

    #[test]
    fn counts_sum_to_subset_size() {
        let records = worked_example();
        let subset = as_refs(&records);
        let counts = count_by(&subset, RecordField::CancerType);

        assert_eq!(counts.get("Lung"), Some(2));
        assert_eq!(counts.get("Skin"), Some(1));
        assert_eq!(counts.total(), subset.len() as u64);
    }

    #[test]
    fn null_category_keys_count_under_blank() {
        let records = vec![
            record("P1", Some("Lung"), None, None),
            record("P2", None, None, None),
        ];
        let subset = as_refs(&records);
        let counts = count_by(&subset, RecordField::CancerType);

        assert_eq!(counts.get("(blank)"), Some(1));
        assert_eq!(counts.total(), 2);
        // Blank sorts ahead of real labels.
        assert_eq!(counts.labels[0], "(blank)");
    }

    #[test]
    fn averages_exclude_null_values_from_sum_and_count() {
        let records = vec![
            record("P1", Some("Lung"), None, Some(100.0)),
            record("P2", Some("Lung"), None, Some(300.0)),
            record("P3", Some("Lung"), None, None),
            record("P4", Some("Skin"), None, None),
        ];
        let subset = as_refs(&records);
        let series = average_by(
            &subset,
            RecordField::CancerType,
            RecordField::TreatmentCostUsd,
        );

        // The null cost in Lung is not a zero: mean is 200, not 133.3.
        assert_eq!(series.get("Lung"), Some(200.0));
        // Skin has no costs at all and is omitted.
        assert_eq!(series.get("Skin"), None);
        assert_eq!(series.labels, vec!["Lung"]);
    }

    #[test]
    fn average_labels_sort_numerically_for_numeric_groups() {
        let mut r1 = Record::new("P1");
        r1.year = Some(2021);
        r1.treatment_cost_usd = Some(10.0);
        let mut r2 = Record::new("P2");
        r2.year = Some(2019);
        r2.treatment_cost_usd = Some(20.0);

        let records = vec![r1, r2];
        let subset = as_refs(&records);
        let series = average_by(&subset, RecordField::Year, RecordField::TreatmentCostUsd);
        assert_eq!(series.labels, vec!["2019", "2021"]);
        assert_eq!(series.values, vec![20.0, 10.0]);
    }

    #[test]
    fn risk_profile_is_fixed_length_and_null_tolerant() {
        let mut r1 = Record::new("P1");
        r1.genetic_risk = Some(0.8);
        r1.smoking = Some(0.4);
        let mut r2 = Record::new("P2");
        r2.genetic_risk = Some(0.2);

        let records = vec![r1, r2];
        let subset = as_refs(&records);
        let profile = risk_profile(&subset);

        assert_eq!(profile.means.len(), RISK_FACTOR_FIELDS.len());
        assert_eq!(profile.labels[0], "Genetic Risk");
        assert!((profile.means[0] - 0.5).abs() < 1e-12);
        // Smoking has a single value; alcohol/obesity have none.
        assert_eq!(profile.means[1], 0.4);
        assert_eq!(profile.means[2], 0.0);
        assert_eq!(profile.means[3], 0.0);
    }

    #[test]
    fn risk_profile_of_empty_subset_is_zero_filled() {
        let profile = risk_profile(&[]);
        assert_eq!(profile.means, vec![0.0; RISK_FACTOR_FIELDS.len()]);
    }

    #[test]
    fn cross_tab_matches_worked_example() {
        let records = worked_example();
        let subset = as_refs(&records);
        let tab = cross_tab(&subset, RecordField::CancerType, RecordField::CancerStage);

        assert_eq!(tab.outer_labels, vec!["Lung", "Skin"]);
        assert_eq!(tab.inner_labels, vec!["I", "II"]);
        assert_eq!(tab.get("Lung", "I"), 2);
        assert_eq!(tab.get("Skin", "II"), 1);
        assert_eq!(tab.get("Lung", "II"), 0);
        assert_eq!(tab.get("Skin", "I"), 0);
    }

    #[test]
    fn cross_tab_marginals_agree_with_counts() {
        let records = vec![
            record("P1", Some("Lung"), Some("I"), None),
            record("P2", Some("Lung"), None, None),
            record("P3", None, Some("I"), None),
        ];
        let subset = as_refs(&records);
        let tab = cross_tab(&subset, RecordField::CancerType, RecordField::CancerStage);
        let by_type = count_by(&subset, RecordField::CancerType);
        let by_stage = count_by(&subset, RecordField::CancerStage);

        for label in &tab.outer_labels {
            assert_eq!(Some(tab.outer_total(label)), by_type.get(label));
        }
        for label in &tab.inner_labels {
            assert_eq!(Some(tab.inner_total(label)), by_stage.get(label));
        }
    }

    #[test]
    fn point_series_keeps_unplottable_points() {
        let mut r1 = Record::new("P1");
        r1.treatment_cost_usd = Some(100.0);
        r1.survival_years = Some(2.0);
        let mut r2 = Record::new("P2");
        r2.survival_years = Some(5.0);

        let records = vec![r1, r2];
        let subset = as_refs(&records);
        let series = point_series(
            &subset,
            RecordField::TreatmentCostUsd,
            RecordField::SurvivalYears,
        );

        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0], Point { x: Some(100.0), y: Some(2.0) });
        assert_eq!(series.points[1], Point { x: None, y: Some(5.0) });
    }

    #[test]
    fn every_computation_handles_the_empty_subset() {
        let subset: Vec<&Record> = Vec::new();

        assert!(count_by(&subset, RecordField::Gender).is_empty());
        assert!(average_by(&subset, RecordField::Year, RecordField::SurvivalYears).is_empty());
        assert!(cross_tab(&subset, RecordField::CancerType, RecordField::CancerStage).is_empty());
        assert!(point_series(&subset, RecordField::TreatmentCostUsd, RecordField::SurvivalYears)
            .points
            .is_empty());
    }
}
