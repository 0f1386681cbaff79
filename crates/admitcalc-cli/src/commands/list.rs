//! The `admitcalc list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use admitcalc_core::config::load_config_from;

use super::load_catalog;

pub fn execute(
    university: Option<String>,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = load_catalog(catalog_path.as_deref(), &config)?;

    let mut table = Table::new();

    match university {
        None => {
            println!(
                "Catalog: {} ({} universities, {} programs)",
                catalog.name(),
                catalog.universities().len(),
                catalog.program_count()
            );
            table.set_header(vec!["ID", "University", "City", "Sector", "Programs"]);
            for u in catalog.universities() {
                table.add_row(vec![
                    Cell::new(&u.id),
                    Cell::new(format!("{} ({})", u.name, u.short_name)),
                    Cell::new(&u.city),
                    Cell::new(u.sector),
                    Cell::new(u.programs.len()),
                ]);
            }
        }
        Some(id) => {
            let Some(u) = catalog.university(&id) else {
                anyhow::bail!("unknown university: {id}");
            };
            println!("{} ({})", u.name, u.short_name);
            table.set_header(vec![
                "ID",
                "Program",
                "Min Marks",
                "Min Test",
                "Weights (marks/test)",
                "Cutoff",
                "Difficulty",
                "Seats",
            ]);
            for p in &u.programs {
                table.add_row(vec![
                    Cell::new(&p.id),
                    Cell::new(format!("{} ({})", p.name, p.short_name)),
                    Cell::new(format!("{}%", p.min_marks)),
                    Cell::new(p.min_entry_test),
                    Cell::new(format!("{}/{}", p.marks_weight, p.entry_test_weight)),
                    Cell::new(p.last_year_cutoff),
                    Cell::new(p.difficulty),
                    Cell::new(p.seats),
                ]);
            }
        }
    }

    println!("{table}");
    Ok(())
}
