//! FILENAME: core/dashboard-engine/src/filter.rs
//! Filter Engine - applies the current selection against the full record set.
//!
//! The filtered subset produced here is the single source of truth for the
//! table and every chart. Nothing downstream re-filters.

use model::{FieldValue, Record, RecordField};
use serde::{Deserialize, Serialize};

// ============================================================================
// FILTERABLE FIELDS
// ============================================================================

/// The six columns a user can constrain, each bound to its comparison
/// semantics: region/type/gender compare as text, year/age/cost numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Region,
    CancerType,
    Year,
    Gender,
    Age,
    TreatmentCost,
}

impl FilterField {
    /// All filterable fields, in the order the UI lays its controls out.
    pub const ALL: [FilterField; 6] = [
        FilterField::Region,
        FilterField::CancerType,
        FilterField::Year,
        FilterField::Gender,
        FilterField::Age,
        FilterField::TreatmentCost,
    ];

    /// The record column this filter constrains.
    pub fn record_field(&self) -> RecordField {
        match self {
            FilterField::Region => RecordField::CountryRegion,
            FilterField::CancerType => RecordField::CancerType,
            FilterField::Year => RecordField::Year,
            FilterField::Gender => RecordField::Gender,
            FilterField::Age => RecordField::Age,
            FilterField::TreatmentCost => RecordField::TreatmentCostUsd,
        }
    }

    /// Whether constraint values compare numerically.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FilterField::Year | FilterField::Age | FilterField::TreatmentCost
        )
    }

    /// The wire key UI controls use for this field.
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::Region => "region",
            FilterField::CancerType => "cancerType",
            FilterField::Year => "year",
            FilterField::Gender => "gender",
            FilterField::Age => "age",
            FilterField::TreatmentCost => "treatmentCost",
        }
    }

    /// Resolves a wire key; unknown keys yield `None` and are ignored upstream.
    pub fn from_key(key: &str) -> Option<FilterField> {
        FilterField::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Coerces a raw UI value into a typed constraint.
    ///
    /// Returns `None` for an empty value or a numeric field whose value does
    /// not parse; both mean "no constraint" rather than an error.
    pub fn coerce(&self, raw: &str) -> Option<FieldValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if self.is_numeric() {
            raw.parse::<f64>().ok().map(FieldValue::Number)
        } else {
            Some(FieldValue::Text(raw.to_string()))
        }
    }
}

// ============================================================================
// FILTER SELECTION
// ============================================================================

/// The user's current constraints: at most one exact value per filterable
/// field. Rebuilt from UI state on every cycle, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    constraints: Vec<(FilterField, FieldValue)>,
}

impl FilterSelection {
    pub fn new() -> Self {
        FilterSelection::default()
    }

    /// Builds a selection from raw `(key, value)` pairs as delivered by the
    /// UI controls. Unknown keys, empty values, and values that fail numeric
    /// coercion all contribute no constraint.
    pub fn from_raw<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut selection = FilterSelection::new();
        for (key, raw) in pairs {
            if let Some(field) = FilterField::from_key(key) {
                selection.set_raw(field, raw);
            }
        }
        selection
    }

    /// Sets or replaces the constraint for one field.
    pub fn set(&mut self, field: FilterField, value: FieldValue) {
        self.clear(field);
        self.constraints.push((field, value));
    }

    /// Sets a constraint from a raw UI string, clearing the field when the
    /// value is empty or uncoercible.
    pub fn set_raw(&mut self, field: FilterField, raw: &str) {
        match field.coerce(raw) {
            Some(value) => self.set(field, value),
            None => self.clear(field),
        }
    }

    /// Removes the constraint for one field, if any.
    pub fn clear(&mut self, field: FilterField) {
        self.constraints.retain(|(f, _)| *f != field);
    }

    /// The constraint value for a field, if constrained.
    pub fn get(&self, field: FilterField) -> Option<&FieldValue> {
        self.constraints
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    /// True when no field is constrained (filtering is the identity).
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Builder form of [`set`](Self::set), convenient in tests.
    pub fn with(mut self, field: FilterField, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    /// Whether a record satisfies every constraint in the selection.
    pub fn matches(&self, record: &Record) -> bool {
        self.constraints
            .iter()
            .all(|(field, want)| record.value(field.record_field()) == *want)
    }
}

/// Applies the selection to the full record set, preserving record order.
///
/// Every downstream view renders from exactly this subset.
pub fn apply_filters<'a>(
    records: &'a [Record],
    selection: &FilterSelection,
) -> Vec<&'a Record> {
    records.iter().filter(|r| selection.matches(r)).collect()
}
