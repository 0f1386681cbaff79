//! The `admitcalc calculate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use admitcalc_core::config::{load_config_from, OutputFormat};
use admitcalc_core::engine::{EvaluationEngine, EvaluationRequest, Selection};
use admitcalc_core::model::{CalculationResult, TierColor};
use admitcalc_core::report::EvaluationReport;

use super::load_catalog;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    marks: f64,
    test_score: f64,
    test_max: Option<f64>,
    university: Option<String>,
    program: Option<String>,
    top: Option<usize>,
    format: Option<String>,
    output: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let top_n = top.unwrap_or(config.top_n);
    anyhow::ensure!(top_n >= 1, "top must be at least 1");

    let format = match format {
        Some(f) => f.parse::<OutputFormat>().map_err(|e| anyhow::anyhow!(e))?,
        None => config.format,
    };

    let catalog = load_catalog(catalog_path.as_deref(), &config)?;

    let request = EvaluationRequest::new(
        marks,
        test_score,
        test_max.unwrap_or(config.default_test_max),
    )
    .with_selection(Selection {
        university_id: university,
        program_id: program,
    });

    let results = EvaluationEngine::new(&catalog).evaluate(&request)?;
    let report = EvaluationReport::new(&catalog, request, results);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report.top(top_n))?);
        }
        OutputFormat::Table => print_table(&report, top_n),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_table(report: &EvaluationReport, top_n: usize) {
    let Some(best) = report.best() else {
        println!("No programs matched the selection.");
        return;
    };

    let mut table = Table::new();
    table.set_header(vec!["#", "University", "Program", "Chance", "Status"]);

    for (rank, result) in report.top(top_n).iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&result.university_short_name),
            Cell::new(&result.program_name),
            Cell::new(format!("{}%", result.percentage())),
            Cell::new(&result.score.status).fg(status_color(result)),
        ]);
    }

    println!("{table}");
    println!(
        "\nShowing {} of {} programs ({} eligible).",
        report.top(top_n).len(),
        report.results.len(),
        report.eligible_count()
    );

    println!("\n{}", share_summary(best));
    for recommendation in &best.score.recommendations {
        println!("  - {recommendation}");
    }
}

fn status_color(result: &CalculationResult) -> Color {
    match result.score.tier.color() {
        TierColor::Success => Color::Green,
        TierColor::Primary => Color::Blue,
        TierColor::Warning => Color::Yellow,
        TierColor::Caution => Color::DarkYellow,
        TierColor::Danger => Color::Red,
    }
}

/// One-line summary suitable for sharing.
fn share_summary(best: &CalculationResult) -> String {
    format!(
        "Top result: {} {} at {}% ({})",
        best.university_short_name,
        best.program_short_name,
        best.percentage(),
        best.score.status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use admitcalc_core::catalog::Catalog;

    #[test]
    fn share_summary_names_the_top_program() {
        let catalog = Catalog::builtin().unwrap();
        let request = EvaluationRequest::new(90.0, 190.0, 200.0)
            .with_selection(Selection::program("comsats", "cs"));
        let results = EvaluationEngine::new(&catalog).evaluate(&request).unwrap();
        assert_eq!(
            share_summary(&results[0]),
            "Top result: COMSATS BSCS at 90% (Excellent Chance)"
        );
    }
}
