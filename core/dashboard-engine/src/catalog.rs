//! FILENAME: core/dashboard-engine/src/catalog.rs
//! Catalog Indexer - distinct-value extraction for filter choices.
//!
//! Built once from the full record set at load time. The UI prepends its own
//! "no constraint" sentinel when populating controls; the catalog holds only
//! values actually observed in the data.

use model::{FieldValue, Record};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::filter::FilterField;

/// The sorted distinct non-null values observed for every filterable field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    fields: Vec<FieldCatalog>,
}

/// Distinct values for a single filterable field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCatalog {
    pub field: FilterField,
    pub values: Vec<FieldValue>,
}

impl Catalog {
    /// Scans the record set once per filterable field. Does not mutate or
    /// retain the records.
    pub fn build(records: &[Record]) -> Self {
        Catalog {
            fields: FilterField::ALL
                .iter()
                .map(|&field| FieldCatalog {
                    field,
                    values: distinct_values(records, field),
                })
                .collect(),
        }
    }

    /// The sorted distinct values for one field.
    pub fn values(&self, field: FilterField) -> &[FieldValue] {
        self.fields
            .iter()
            .find(|fc| fc.field == field)
            .map(|fc| fc.values.as_slice())
            .unwrap_or(&[])
    }

    /// All per-field catalogs, in UI control order.
    pub fn fields(&self) -> &[FieldCatalog] {
        &self.fields
    }
}

/// Returns the sorted set of distinct non-null values for one field.
///
/// Sort order is the natural order of the value's type: numeric for numbers,
/// lexicographic for text. An empty record set yields an empty set.
pub fn distinct_values(records: &[Record], field: FilterField) -> Vec<FieldValue> {
    let record_field = field.record_field();
    let mut seen = FxHashSet::default();
    let mut values = Vec::new();

    for record in records {
        let value = record.value(record_field);
        if value.is_empty() {
            continue;
        }
        if seen.insert(value.clone()) {
            values.push(value);
        }
    }

    values.sort();
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<Record> {
        let mut a = Record::new("P1");
        a.country_region = Some("Europe".to_string());
        a.year = Some(2021);

        let mut b = Record::new("P2");
        b.country_region = Some("Asia".to_string());
        b.year = Some(2019);

        let mut c = Record::new("P3");
        c.country_region = Some("Asia".to_string());
        // no year

        vec![a, b, c]
    }

    #[test]
    fn values_are_distinct_sorted_and_non_null() {
        let records = sample_records();
        assert_eq!(
            distinct_values(&records, FilterField::Region),
            vec![
                FieldValue::Text("Asia".to_string()),
                FieldValue::Text("Europe".to_string()),
            ]
        );
        assert_eq!(
            distinct_values(&records, FilterField::Year),
            vec![FieldValue::Number(2019.0), FieldValue::Number(2021.0)]
        );
    }

    #[test]
    fn empty_record_set_yields_empty_catalogs() {
        let catalog = Catalog::build(&[]);
        for field in FilterField::ALL {
            assert!(catalog.values(field).is_empty());
        }
    }

    #[test]
    fn catalog_covers_every_filterable_field() {
        let catalog = Catalog::build(&sample_records());
        assert_eq!(catalog.fields().len(), FilterField::ALL.len());
        assert_eq!(catalog.values(FilterField::Gender), &[] as &[FieldValue]);
    }
}
