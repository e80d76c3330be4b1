//! FILENAME: core/model/src/lib.rs
//! PURPOSE: Main library entry point for the shared data model.
//! CONTEXT: Re-exports the record shape, column identifiers, and formatting
//! helpers for use by the other crates.

pub mod field;
pub mod format;
pub mod record;

// Re-export commonly used types at the crate root
pub use field::RecordField;
pub use format::{format_value, FormatHint};
pub use record::{FieldValue, Record};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_projects_and_formats_a_record() {
        let mut record = Record::new("P100");
        record.treatment_cost_usd = Some(12500.0);
        record.survival_years = Some(3.27);

        let cost = record.value(RecordField::TreatmentCostUsd);
        assert_eq!(
            format_value(&cost, RecordField::TreatmentCostUsd.format_hint()),
            "$12,500"
        );

        let survival = record.value(RecordField::SurvivalYears);
        assert_eq!(
            format_value(&survival, RecordField::SurvivalYears.format_hint()),
            "3.3"
        );
    }

    #[test]
    fn records_round_trip_through_json() {
        let mut record = Record::new("P7");
        record.country_region = Some("Asia".to_string());
        record.year = Some(2019);
        record.age = Some(64.0);

        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
