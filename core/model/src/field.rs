//! FILENAME: core/model/src/field.rs
//! PURPOSE: Column identifiers and per-column table metadata.
//! CONTEXT: Every consumer that needs "a column of the record" goes through
//! `RecordField` rather than string keys, so a typo is a compile error.

use serde::{Deserialize, Serialize};

use crate::format::FormatHint;

/// All fifteen columns of a record, in the declared table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    PatientId,
    CountryRegion,
    CancerType,
    CancerStage,
    Year,
    Age,
    Gender,
    TreatmentCostUsd,
    GeneticRisk,
    AirPollution,
    AlcoholUse,
    Smoking,
    ObesityLevel,
    TargetSeverityScore,
    SurvivalYears,
}

impl RecordField {
    /// The fixed column order the table renderer receives rows in.
    pub const TABLE_ORDER: [RecordField; 15] = [
        RecordField::PatientId,
        RecordField::CountryRegion,
        RecordField::CancerType,
        RecordField::CancerStage,
        RecordField::Year,
        RecordField::Age,
        RecordField::Gender,
        RecordField::TreatmentCostUsd,
        RecordField::GeneticRisk,
        RecordField::AirPollution,
        RecordField::AlcoholUse,
        RecordField::Smoking,
        RecordField::ObesityLevel,
        RecordField::TargetSeverityScore,
        RecordField::SurvivalYears,
    ];

    /// Display title for table headers and chart axes.
    pub fn title(&self) -> &'static str {
        match self {
            RecordField::PatientId => "ID",
            RecordField::CountryRegion => "Region",
            RecordField::CancerType => "Cancer Type",
            RecordField::CancerStage => "Stage",
            RecordField::Year => "Year",
            RecordField::Age => "Age",
            RecordField::Gender => "Gender",
            RecordField::TreatmentCostUsd => "Treatment Cost",
            RecordField::GeneticRisk => "Genetic Risk",
            RecordField::AirPollution => "Air Pollution",
            RecordField::AlcoholUse => "Alcohol Use",
            RecordField::Smoking => "Smoking",
            RecordField::ObesityLevel => "Obesity Level",
            RecordField::TargetSeverityScore => "Severity Score",
            RecordField::SurvivalYears => "Survival Years",
        }
    }

    /// How the renderer should format values of this column.
    pub fn format_hint(&self) -> FormatHint {
        match self {
            RecordField::TreatmentCostUsd => FormatHint::Currency,
            RecordField::SurvivalYears => FormatHint::FixedDecimal(1),
            _ => FormatHint::Plain,
        }
    }
}
