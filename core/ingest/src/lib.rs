//! FILENAME: core/ingest/src/lib.rs
//! Registry Dataset Import
//!
//! Loads the patient registry CSV into typed records. Retrieval happens once,
//! before the dashboard core is ever invoked; the core only sees the result.

mod csv_reader;
mod error;

pub use csv_reader::{load_dataset, read_dataset};
pub use error::DatasetError;

use model::Record;
use serde::{Deserialize, Serialize};

/// The loaded registry: typed records in file order, plus how many source
/// rows were discarded for lacking an identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub records: Vec<Record>,
    pub dropped_rows: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
