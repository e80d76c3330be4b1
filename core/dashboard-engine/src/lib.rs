//! FILENAME: core/dashboard-engine/src/lib.rs
//! Filter-and-aggregate pipeline for the patient dashboard.
//!
//! This crate takes the full record set plus the user's filter selection and
//! produces everything the table and chart renderers consume. It holds no
//! state between cycles: each update re-runs the whole pipeline against an
//! immutable snapshot of the records.
//!
//! Layers:
//! - `catalog`: distinct-value index used to populate filter choices
//! - `filter`: the selection model and its application to the record set
//! - `aggregate`: the summary computations (counts, averages, cross-tab)
//! - `view`: the assembled snapshot handed to renderers

pub mod aggregate;
pub mod catalog;
pub mod filter;
pub mod view;

pub use aggregate::{
    average_by, count_by, cross_tab, point_series, risk_profile, CategoryCount,
    CategorySeries, CrossTab, Point, PointSeries, RiskProfile, RISK_FACTOR_FIELDS,
};
pub use catalog::{distinct_values, Catalog, FieldCatalog};
pub use filter::{apply_filters, FilterField, FilterSelection};
pub use view::{DashboardView, TableColumn, TableView};
