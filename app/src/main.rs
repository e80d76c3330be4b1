//! FILENAME: app/src/main.rs
//! Dashboard CLI - filter the registry and print the table and chart views.
//!
//! Usage:
//!   dashboard --data global_cancer.csv
//!   dashboard --data global_cancer.csv --region Asia --year 2020
//!   dashboard --data global_cancer.csv --cancer-type Lung --json

mod render;

use clap::Parser;
use dashboard_engine::{Catalog, DashboardView, FilterSelection};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Analytical dashboard over a cancer-registry CSV export")]
#[command(version)]
struct Cli {
    /// Path to the registry CSV export
    #[arg(long)]
    data: PathBuf,

    /// Keep only records from this region
    #[arg(long)]
    region: Option<String>,

    /// Keep only records with this cancer type
    #[arg(long = "cancer-type")]
    cancer_type: Option<String>,

    /// Keep only records diagnosed in this year
    #[arg(long)]
    year: Option<String>,

    /// Keep only records with this gender
    #[arg(long)]
    gender: Option<String>,

    /// Keep only records with this exact age
    #[arg(long)]
    age: Option<String>,

    /// Keep only records with this exact treatment cost
    #[arg(long)]
    cost: Option<String>,

    /// Print the filter choices observed in the data and exit
    #[arg(long)]
    choices: bool,

    /// Print the snapshot as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Table rows to print in text mode
    #[arg(long, default_value_t = 10)]
    rows: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let dataset = match ingest::load_dataset(&cli.data) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "loaded {} records ({} dropped)",
        dataset.len(),
        dataset.dropped_rows
    );

    if cli.choices {
        render::print_catalog(&Catalog::build(&dataset.records));
        return ExitCode::SUCCESS;
    }

    let selection = build_selection(&cli);
    let view = DashboardView::for_records(&dataset.records, &selection);

    if cli.json {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("error: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        render::print_view(&view, cli.rows);
    }

    ExitCode::SUCCESS
}

/// Builds the selection from the raw flag values; the core handles coercion
/// and treats absent or unusable values as unconstrained.
fn build_selection(cli: &Cli) -> FilterSelection {
    let pairs: [(&str, &Option<String>); 6] = [
        ("region", &cli.region),
        ("cancerType", &cli.cancer_type),
        ("year", &cli.year),
        ("gender", &cli.gender),
        ("age", &cli.age),
        ("treatmentCost", &cli.cost),
    ];

    FilterSelection::from_raw(
        pairs
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v))),
    )
}
