//! The `admitcalc validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use admitcalc_core::parser::{self, CatalogFile, Severity};

const BUILTIN_CATALOG: &str = "builtin.toml";

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let catalogs = match &catalog_path {
        Some(path) if path.is_dir() => parser::load_catalog_directory(path)?,
        Some(path) => vec![parser::parse_catalog(path)?],
        None => {
            // Re-parse the embedded copy so authoring defects show up as issues,
            // not as a refusal to load.
            vec![parser::parse_catalog_str(
                admitcalc_core::catalog::BUILTIN_CATALOG_TOML,
                Path::new(BUILTIN_CATALOG),
            )?]
        }
    };

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for catalog in &catalogs {
        println!(
            "Catalog: {} ({} universities, {} programs)",
            catalog.name,
            catalog.universities.len(),
            program_count(catalog)
        );

        for issue in parser::validate_catalog(catalog) {
            let prefix = match issue.location() {
                loc if loc.is_empty() => "  ".to_string(),
                loc => format!("  [{loc}]"),
            };
            println!("{prefix} {}: {}", issue.severity, issue.message);
            match issue.severity {
                Severity::Error => total_errors += 1,
                Severity::Warning => total_warnings += 1,
            }
        }
    }

    if total_errors > 0 {
        anyhow::bail!("{total_errors} error(s), {total_warnings} warning(s) found");
    }

    if total_warnings == 0 {
        println!("All catalogs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn program_count(catalog: &CatalogFile) -> usize {
    catalog.universities.iter().map(|u| u.programs.len()).sum()
}
