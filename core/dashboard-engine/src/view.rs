//! FILENAME: core/dashboard-engine/src/view.rs
//! View assembly - the full snapshot handed to the table and chart renderers.
//!
//! One `DashboardView` is built per update cycle, entirely from the active
//! subset. Renderers receive shaped data only; they never see the filter
//! selection or re-derive anything.

use model::{FieldValue, FormatHint, Record, RecordField};
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    average_by, count_by, cross_tab, point_series, risk_profile, CategoryCount,
    CategorySeries, CrossTab, PointSeries, RiskProfile,
};
use crate::filter::{apply_filters, FilterSelection};

// ============================================================================
// TABLE VIEW
// ============================================================================

/// Column metadata for the table renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub title: String,
    pub hint: FormatHint,
}

/// The filtered subset shaped for the table renderer: fixed-width row tuples
/// in the declared column order, one row per record, in subset order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<FieldValue>>,
}

impl TableView {
    pub fn build(subset: &[&Record]) -> Self {
        let columns = RecordField::TABLE_ORDER
            .iter()
            .map(|field| TableColumn {
                title: field.title().to_string(),
                hint: field.format_hint(),
            })
            .collect();

        let rows = subset
            .iter()
            .map(|record| {
                RecordField::TABLE_ORDER
                    .iter()
                    .map(|&field| record.value(field))
                    .collect()
            })
            .collect();

        TableView { columns, rows }
    }
}

// ============================================================================
// DASHBOARD VIEW
// ============================================================================

/// Everything the renderers need for one filter state: the table plus the
/// ten chart payloads, all derived from the same subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub table: TableView,
    /// 1. Patients per region (bar).
    pub patients_by_region: CategoryCount,
    /// 2. Cases per cancer type (pie).
    pub cases_by_cancer_type: CategoryCount,
    /// 3. Average treatment cost per year (line).
    pub cost_by_year: CategorySeries,
    /// 4. Average survival years per year (area).
    pub survival_by_year: CategorySeries,
    /// 5. Risk-factor profile (radar).
    pub risk_profile: RiskProfile,
    /// 6. Average severity score per stage (polar area).
    pub severity_by_stage: CategorySeries,
    /// 7. Average treatment cost per cancer type (horizontal bar).
    pub cost_by_cancer_type: CategorySeries,
    /// 8. Patients per gender (doughnut).
    pub patients_by_gender: CategoryCount,
    /// 9. Treatment cost vs survival years (scatter).
    pub cost_vs_survival: PointSeries,
    /// 10. Stage distribution per cancer type (stacked bar).
    pub stage_by_type: CrossTab,
}

impl DashboardView {
    /// Assembles the snapshot from an already-filtered subset.
    pub fn build(subset: &[&Record]) -> Self {
        DashboardView {
            table: TableView::build(subset),
            patients_by_region: count_by(subset, RecordField::CountryRegion),
            cases_by_cancer_type: count_by(subset, RecordField::CancerType),
            cost_by_year: average_by(subset, RecordField::Year, RecordField::TreatmentCostUsd),
            survival_by_year: average_by(subset, RecordField::Year, RecordField::SurvivalYears),
            risk_profile: risk_profile(subset),
            severity_by_stage: average_by(
                subset,
                RecordField::CancerStage,
                RecordField::TargetSeverityScore,
            ),
            cost_by_cancer_type: average_by(
                subset,
                RecordField::CancerType,
                RecordField::TreatmentCostUsd,
            ),
            patients_by_gender: count_by(subset, RecordField::Gender),
            cost_vs_survival: point_series(
                subset,
                RecordField::TreatmentCostUsd,
                RecordField::SurvivalYears,
            ),
            stage_by_type: cross_tab(subset, RecordField::CancerType, RecordField::CancerStage),
        }
    }

    /// Runs the whole pipeline: filters the record set, then assembles the
    /// snapshot from the resulting subset.
    pub fn for_records(records: &[Record], selection: &FilterSelection) -> Self {
        let subset = apply_filters(records, selection);
        DashboardView::build(&subset)
    }
}
