//! FILENAME: app/src/render.rs
//! Text rendering of the dashboard snapshot.
//!
//! Stands in for the browser table and chart widgets: consumes only the
//! shaped view, never the records or the selection.

use dashboard_engine::{
    Catalog, CategoryCount, CategorySeries, CrossTab, DashboardView, PointSeries,
    RiskProfile, TableView,
};
use model::format_value;

/// Prints the table (truncated to `max_rows`) and every chart summary.
pub fn print_view(view: &DashboardView, max_rows: usize) {
    print_table(&view.table, max_rows);

    print_counts("Patients by region", &view.patients_by_region);
    print_counts("Cases by cancer type", &view.cases_by_cancer_type);
    print_series("Avg treatment cost by year", &view.cost_by_year);
    print_series("Avg survival years by year", &view.survival_by_year);
    print_profile("Risk-factor profile", &view.risk_profile);
    print_series("Avg severity by stage", &view.severity_by_stage);
    print_series("Avg cost by cancer type", &view.cost_by_cancer_type);
    print_counts("Patients by gender", &view.patients_by_gender);
    print_scatter("Cost vs survival", &view.cost_vs_survival);
    print_cross_tab("Stage by cancer type", &view.stage_by_type);
}

/// Prints the filter choices for every filterable field.
pub fn print_catalog(catalog: &Catalog) {
    println!("Filter choices:");
    for field_catalog in catalog.fields() {
        let labels: Vec<String> = field_catalog.values.iter().map(|v| v.label()).collect();
        println!("  {:?}: {}", field_catalog.field, labels.join(", "));
    }
}

fn print_table(table: &TableView, max_rows: usize) {
    // Format every cell first so widths account for separators and symbols.
    let formatted: Vec<Vec<String>> = table
        .rows
        .iter()
        .take(max_rows)
        .map(|row| {
            row.iter()
                .zip(table.columns.iter())
                .map(|(value, column)| format_value(value, column.hint))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.title.len()).collect();
    for row in &formatted {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(widths.iter())
        .map(|(column, &width)| format!("{:width$}", column.title, width = width))
        .collect();
    println!("{}", header.join("  "));

    for row in &formatted {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{:width$}", cell, width = width))
            .collect();
        println!("{}", line.join("  "));
    }

    if table.rows.len() > max_rows {
        println!("... {} more rows", table.rows.len() - max_rows);
    }
    println!();
}

fn print_counts(title: &str, counts: &CategoryCount) {
    println!("{} ({} total)", title, counts.total());
    for (label, count) in counts.labels.iter().zip(counts.counts.iter()) {
        println!("  {:<16} {}", label, count);
    }
    println!();
}

fn print_series(title: &str, series: &CategorySeries) {
    println!("{}", title);
    for (label, value) in series.labels.iter().zip(series.values.iter()) {
        println!("  {:<16} {:.2}", label, value);
    }
    println!();
}

fn print_profile(title: &str, profile: &RiskProfile) {
    println!("{}", title);
    for (label, mean) in profile.labels.iter().zip(profile.means.iter()) {
        println!("  {:<16} {:.3}", label, mean);
    }
    println!();
}

fn print_scatter(title: &str, series: &PointSeries) {
    let plottable = series
        .points
        .iter()
        .filter(|p| p.x.is_some() && p.y.is_some())
        .count();
    println!(
        "{}: {} points ({} plottable)",
        title,
        series.points.len(),
        plottable
    );
    println!();
}

fn print_cross_tab(title: &str, tab: &CrossTab) {
    println!("{}", title);
    let outer_width = tab
        .outer_labels
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(0)
        .max(4);

    let header: Vec<String> = tab.inner_labels.iter().map(|l| format!("{:>8}", l)).collect();
    println!("  {:width$}  {}", "", header.join(" "), width = outer_width);

    for (label, row) in tab.outer_labels.iter().zip(tab.counts.iter()) {
        let cells: Vec<String> = row.iter().map(|c| format!("{:>8}", c)).collect();
        println!("  {:width$}  {}", label, cells.join(" "), width = outer_width);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_engine::FilterSelection;
    use model::Record;

    #[test]
    fn rendering_an_empty_view_does_not_panic() {
        let records: Vec<Record> = Vec::new();
        let view = DashboardView::for_records(&records, &FilterSelection::new());
        print_view(&view, 5);
        print_catalog(&Catalog::build(&records));
    }
}
