//! FILENAME: core/ingest/src/csv_reader.rs
//! CSV import for the registry export format.
//!
//! The export is a headed CSV whose cells are dynamically typed: an empty or
//! unparseable numeric cell becomes a missing value rather than an error.
//! Rows without a patient identifier are dropped here so that every record
//! reaching the core carries one.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use model::Record;

use crate::error::DatasetError;
use crate::Dataset;

/// Loads the registry dataset from a CSV file on disk.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let file = File::open(path)?;
    read_dataset(file)
}

/// Reads the registry dataset from any CSV source.
pub fn read_dataset<R: Read>(source: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    let mut dropped_rows = 0usize;
    for row in reader.records() {
        let row = row?;
        match columns.parse_row(&row) {
            Some(record) => records.push(record),
            None => dropped_rows += 1,
        }
    }

    if dropped_rows > 0 {
        log::warn!(
            "dropped {} row(s) without a patient identifier",
            dropped_rows
        );
    }

    Ok(Dataset {
        records,
        dropped_rows,
    })
}

// ============================================================================
// COLUMN RESOLUTION
// ============================================================================

/// Header indices for every expected column, resolved once per file.
struct ColumnMap {
    patient_id: usize,
    country_region: usize,
    cancer_type: usize,
    cancer_stage: usize,
    year: usize,
    age: usize,
    gender: usize,
    treatment_cost_usd: usize,
    genetic_risk: usize,
    air_pollution: usize,
    alcohol_use: usize,
    smoking: usize,
    obesity_level: usize,
    target_severity_score: usize,
    survival_years: usize,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &'static str| -> Result<usize, DatasetError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(DatasetError::MissingColumn(name))
        };

        Ok(ColumnMap {
            patient_id: find("Patient_ID")?,
            country_region: find("Country_Region")?,
            cancer_type: find("Cancer_Type")?,
            cancer_stage: find("Cancer_Stage")?,
            year: find("Year")?,
            age: find("Age")?,
            gender: find("Gender")?,
            treatment_cost_usd: find("Treatment_Cost_USD")?,
            genetic_risk: find("Genetic_Risk")?,
            air_pollution: find("Air_Pollution")?,
            alcohol_use: find("Alcohol_Use")?,
            smoking: find("Smoking")?,
            obesity_level: find("Obesity_Level")?,
            target_severity_score: find("Target_Severity_Score")?,
            survival_years: find("Survival_Years")?,
        })
    }

    /// Parses one data row; `None` means the row has no identifier and is
    /// to be dropped.
    fn parse_row(&self, row: &StringRecord) -> Option<Record> {
        let id = cell(row, self.patient_id);
        if id.is_empty() {
            return None;
        }

        let mut record = Record::new(id);
        record.country_region = text_cell(row, self.country_region);
        record.cancer_type = text_cell(row, self.cancer_type);
        record.cancer_stage = text_cell(row, self.cancer_stage);
        record.year = number_cell(row, self.year).map(|n| n as i32);
        record.age = number_cell(row, self.age);
        record.gender = text_cell(row, self.gender);
        record.treatment_cost_usd = number_cell(row, self.treatment_cost_usd);
        record.genetic_risk = number_cell(row, self.genetic_risk);
        record.air_pollution = number_cell(row, self.air_pollution);
        record.alcohol_use = number_cell(row, self.alcohol_use);
        record.smoking = number_cell(row, self.smoking);
        record.obesity_level = number_cell(row, self.obesity_level);
        record.target_severity_score = number_cell(row, self.target_severity_score);
        record.survival_years = number_cell(row, self.survival_years);
        Some(record)
    }
}

fn cell<'r>(row: &'r StringRecord, index: usize) -> &'r str {
    row.get(index).unwrap_or("").trim()
}

fn text_cell(row: &StringRecord, index: usize) -> Option<String> {
    let value = cell(row, index);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn number_cell(row: &StringRecord, index: usize) -> Option<f64> {
    cell(row, index).parse::<f64>().ok()
}
