//! FILENAME: core/model/src/record.rs
//! PURPOSE: Defines the patient record and the dynamic view of a single field.
//! CONTEXT: This file contains the `Record` struct and `FieldValue` enum.
//! A record is immutable once loaded; every field other than the identifier
//! may be absent, and downstream aggregation must tolerate that.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::field::RecordField;

/// One patient entry from the registry dataset.
///
/// Ingestion guarantees `patient_id` is present and non-empty; it makes no
/// such promise for any other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub patient_id: String,
    pub country_region: Option<String>,
    pub cancer_type: Option<String>,
    pub cancer_stage: Option<String>,
    pub year: Option<i32>,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub treatment_cost_usd: Option<f64>,
    pub genetic_risk: Option<f64>,
    pub air_pollution: Option<f64>,
    pub alcohol_use: Option<f64>,
    pub smoking: Option<f64>,
    pub obesity_level: Option<f64>,
    pub target_severity_score: Option<f64>,
    pub survival_years: Option<f64>,
}

impl Record {
    /// Creates a record with only the identifier set.
    pub fn new(patient_id: impl Into<String>) -> Self {
        Record {
            patient_id: patient_id.into(),
            country_region: None,
            cancer_type: None,
            cancer_stage: None,
            year: None,
            age: None,
            gender: None,
            treatment_cost_usd: None,
            genetic_risk: None,
            air_pollution: None,
            alcohol_use: None,
            smoking: None,
            obesity_level: None,
            target_severity_score: None,
            survival_years: None,
        }
    }

    /// Projects the record onto a single column as a `FieldValue`.
    ///
    /// This is the only bridge between the statically typed record shape and
    /// the generic catalog/filter/grouping machinery.
    pub fn value(&self, field: RecordField) -> FieldValue {
        match field {
            RecordField::PatientId => FieldValue::Text(self.patient_id.clone()),
            RecordField::CountryRegion => text_value(&self.country_region),
            RecordField::CancerType => text_value(&self.cancer_type),
            RecordField::CancerStage => text_value(&self.cancer_stage),
            RecordField::Year => number_value(self.year.map(|y| y as f64)),
            RecordField::Age => number_value(self.age),
            RecordField::Gender => text_value(&self.gender),
            RecordField::TreatmentCostUsd => number_value(self.treatment_cost_usd),
            RecordField::GeneticRisk => number_value(self.genetic_risk),
            RecordField::AirPollution => number_value(self.air_pollution),
            RecordField::AlcoholUse => number_value(self.alcohol_use),
            RecordField::Smoking => number_value(self.smoking),
            RecordField::ObesityLevel => number_value(self.obesity_level),
            RecordField::TargetSeverityScore => number_value(self.target_severity_score),
            RecordField::SurvivalYears => number_value(self.survival_years),
        }
    }
}

fn text_value(source: &Option<String>) -> FieldValue {
    match source {
        Some(s) => FieldValue::Text(s.clone()),
        None => FieldValue::Empty,
    }
}

fn number_value(source: Option<f64>) -> FieldValue {
    match source {
        Some(n) => FieldValue::Number(n),
        None => FieldValue::Empty,
    }
}

/// The dynamic view of one cell of a record.
///
/// Equality and hashing normalize NaN (all NaN values compare equal and hash
/// to the same bucket) so numeric values can serve as group and dedup keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
    Empty,
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// The numeric content, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Display label for chart axes and filter choices.
    ///
    /// Missing values get the `(blank)` pseudo-label so they remain visible
    /// as their own category instead of silently disappearing.
    pub fn label(&self) -> String {
        match self {
            FieldValue::Empty => "(blank)".to_string(),
            FieldValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::Text(s) => s.clone(),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Empty, FieldValue::Empty) => true,
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            FieldValue::Empty => 0u8.hash(state),
            FieldValue::Number(n) => {
                1u8.hash(state);
                if n.is_nan() {
                    // All NaN values hash to the same thing
                    u64::MAX.hash(state);
                } else {
                    n.to_bits().hash(state);
                }
            }
            FieldValue::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl Ord for FieldValue {
    /// Total order used for catalog listings and group labels:
    /// Empty < Number < Text, numbers numerically, text lexicographically.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Empty, FieldValue::Empty) => Ordering::Equal,
            (FieldValue::Empty, _) => Ordering::Less,
            (_, FieldValue::Empty) => Ordering::Greater,

            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Number(_), _) => Ordering::Less,
            (_, FieldValue::Number(_)) => Ordering::Greater,

            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
