//! The `admitcalc init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("admitcalc.toml").exists() {
        println!("admitcalc.toml already exists, skipping.");
    } else {
        std::fs::write("admitcalc.toml", SAMPLE_CONFIG)?;
        println!("Created admitcalc.toml");
    }

    std::fs::create_dir_all("catalogs")?;
    let example_path = std::path::Path::new("catalogs/example.toml");
    if example_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your universities to catalogs/example.toml");
    println!("  2. Run: admitcalc validate --catalog catalogs/example.toml");
    println!("  3. Run: admitcalc calculate --marks 85 --test-score 150 --catalog catalogs/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# admitcalc configuration

# Catalog to use instead of the built-in one.
# catalog = "catalogs/example.toml"

default_test_max = 200
top_n = 10
format = "table"
"#;

const EXAMPLE_CATALOG: &str = r##"[catalog]
id = "example"
name = "Example Catalog"
description = "A small catalog to get started"

[[universities]]
id = "comsats"
name = "COMSATS University Islamabad"
short_name = "COMSATS"
color = "#0F766E"
city = "Islamabad"
sector = "public"

[[universities.programs]]
id = "cs"
name = "Computer Science"
short_name = "BSCS"
min_marks = 60
min_entry_test = 50
marks_weight = 50
entry_test_weight = 50
seats = 250
last_year_cutoff = 70
difficulty = "medium"

[[universities.programs]]
id = "bba"
name = "Business Administration"
short_name = "BBA"
min_marks = 50
min_entry_test = 40
marks_weight = 50
entry_test_weight = 50
seats = 150
last_year_cutoff = 55
difficulty = "easy"

[[universities]]
id = "nust"
name = "National University of Sciences and Technology"
short_name = "NUST"
color = "#003366"
city = "Islamabad"
sector = "public"

[[universities.programs]]
id = "cs"
name = "Computer Science"
short_name = "BSCS"
min_marks = 80
min_entry_test = 140
marks_weight = 25
entry_test_weight = 75
seats = 120
# Point-based aggregate; halved before comparison.
last_year_cutoff = 168
cutoff_scale = "raw"
difficulty = "very_hard"
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use admitcalc_core::config::parse_config_str;
    use admitcalc_core::parser::{parse_catalog_str, validate_catalog};
    use std::path::Path;

    #[test]
    fn starter_files_parse_cleanly() {
        let config = parse_config_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.top_n, 10);

        let catalog = parse_catalog_str(EXAMPLE_CATALOG, Path::new("example.toml")).unwrap();
        assert_eq!(catalog.universities.len(), 2);
        assert_eq!(catalog.universities[0].color, "#0F766E");
        assert_eq!(catalog.universities[1].color, "#003366");
        assert!(validate_catalog(&catalog).is_empty());
    }
}
