//! The `admitcalc compare` command.

use std::path::PathBuf;

use anyhow::Result;

use admitcalc_core::report::EvaluationReport;

enum CompareFormat {
    Text,
    Markdown,
    Json,
}

impl std::str::FromStr for CompareFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(CompareFormat::Text),
            "markdown" | "md" => Ok(CompareFormat::Markdown),
            "json" => Ok(CompareFormat::Json),
            other => Err(format!("unknown comparison format: {other}")),
        }
    }
}

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    let format: CompareFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let baseline = EvaluationReport::load_json(&baseline_path)?;
    let current = EvaluationReport::load_json(&current_path)?;

    let comparison = current.compare(&baseline);

    match format {
        CompareFormat::Markdown => {
            println!("{}", comparison.to_markdown());
        }
        CompareFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
        CompareFormat::Text => {
            println!(
                "Comparison: {} improved, {} declined, {} unchanged",
                comparison.improved.len(),
                comparison.declined.len(),
                comparison.unchanged
            );

            for (title, changes) in [
                ("Improved", &comparison.improved),
                ("Declined", &comparison.declined),
            ] {
                if changes.is_empty() {
                    continue;
                }
                println!("\n{title}:");
                for c in changes {
                    println!(
                        "  {}/{} {}% -> {}% ({:+}%) {}",
                        c.university_id,
                        c.program_id,
                        c.baseline_percentage,
                        c.current_percentage,
                        c.delta(),
                        c.current_status
                    );
                }
            }

            if comparison.new_programs > 0 {
                println!("\n{} new program(s)", comparison.new_programs);
            }
            if comparison.removed_programs > 0 {
                println!("{} removed program(s)", comparison.removed_programs);
            }
        }
    }

    if fail_on_decline && comparison.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}
