//! TOML catalog parser.
//!
//! Loads catalogs from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{CutoffScale, Difficulty, Program, Sector, University};

/// An authored catalog as read from disk, before it is frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub universities: Vec<University>,
}

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    universities: Vec<TomlUniversity>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlUniversity {
    id: String,
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    color: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    sector: Sector,
    #[serde(default)]
    programs: Vec<TomlProgram>,
}

#[derive(Debug, Deserialize)]
struct TomlProgram {
    id: String,
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    min_marks: f64,
    min_entry_test: f64,
    marks_weight: u32,
    entry_test_weight: u32,
    #[serde(default)]
    seats: u32,
    last_year_cutoff: f64,
    #[serde(default)]
    cutoff_scale: Option<CutoffScale>,
    #[serde(default = "default_difficulty")]
    difficulty: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// Parse a single TOML file into a `CatalogFile`.
pub fn parse_catalog(path: &Path) -> Result<CatalogFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `CatalogFile` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<CatalogFile> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let universities = parsed
        .universities
        .into_iter()
        .map(|u| {
            let programs = u
                .programs
                .into_iter()
                .map(|p| {
                    let difficulty: Difficulty = p.difficulty.parse().map_err(|e: String| {
                        anyhow::anyhow!("{}/{}: {}", u.id, p.id, e)
                    })?;
                    Ok(Program {
                        short_name: p.short_name.unwrap_or_else(|| p.name.clone()),
                        id: p.id,
                        name: p.name,
                        min_marks: p.min_marks,
                        min_entry_test: p.min_entry_test,
                        marks_weight: p.marks_weight,
                        entry_test_weight: p.entry_test_weight,
                        seats: p.seats,
                        last_year_cutoff: p.last_year_cutoff,
                        cutoff_scale: p.cutoff_scale,
                        difficulty,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(University {
                short_name: u.short_name.unwrap_or_else(|| u.name.clone()),
                id: u.id,
                name: u.name,
                color: u.color,
                city: u.city,
                sector: u.sector,
                programs,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CatalogFile {
        id: parsed.catalog.id,
        name: parsed.catalog.name,
        description: parsed.catalog.description,
        universities,
    })
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<CatalogFile>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The catalog cannot be used.
    Error,
    /// Suspicious, but scoring still works.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A finding from catalog validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub university_id: Option<String>,
    pub program_id: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    fn error(university: &str, program: Option<&str>, message: String) -> Self {
        Self {
            severity: Severity::Error,
            university_id: Some(university.to_string()),
            program_id: program.map(str::to_string),
            message,
        }
    }

    fn warning(university: &str, program: &str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            university_id: Some(university.to_string()),
            program_id: Some(program.to_string()),
            message,
        }
    }

    /// `nust/cs`-style location label.
    pub fn location(&self) -> String {
        match (&self.university_id, &self.program_id) {
            (Some(u), Some(p)) => format!("{u}/{p}"),
            (Some(u), None) => u.clone(),
            _ => String::new(),
        }
    }
}

/// Validate a catalog for authoring defects.
pub fn validate_catalog(catalog: &CatalogFile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if catalog.universities.is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            university_id: None,
            program_id: None,
            message: "catalog has no universities".into(),
        });
    }

    let mut seen_universities = HashSet::new();
    for university in &catalog.universities {
        let uid = university.id.as_str();

        if uid.trim().is_empty() {
            issues.push(ValidationIssue::error(uid, None, "university id is empty".into()));
        }
        if !seen_universities.insert(uid) {
            issues.push(ValidationIssue::error(
                uid,
                None,
                format!("duplicate university ID: {uid}"),
            ));
        }
        if university.programs.is_empty() {
            issues.push(ValidationIssue::error(uid, None, "university has no programs".into()));
        }

        let mut seen_programs = HashSet::new();
        for program in &university.programs {
            let pid = program.id.as_str();

            if pid.trim().is_empty() {
                issues.push(ValidationIssue::error(uid, Some(pid), "program id is empty".into()));
            }
            if !seen_programs.insert(pid) {
                issues.push(ValidationIssue::error(
                    uid,
                    Some(pid),
                    format!("duplicate program ID: {pid}"),
                ));
            }
            if program.weights_sum() != 100 {
                issues.push(ValidationIssue::error(
                    uid,
                    Some(pid),
                    format!(
                        "weights must sum to 100 (marks {} + entry test {} = {})",
                        program.marks_weight,
                        program.entry_test_weight,
                        program.weights_sum()
                    ),
                ));
            }
            if !program.last_year_cutoff.is_finite() || program.last_year_cutoff <= 0.0 {
                issues.push(ValidationIssue::error(
                    uid,
                    Some(pid),
                    format!("last_year_cutoff must be positive, got {}", program.last_year_cutoff),
                ));
            }
            if !(0.0..=100.0).contains(&program.min_marks) {
                issues.push(ValidationIssue::error(
                    uid,
                    Some(pid),
                    format!("min_marks must be between 0 and 100, got {}", program.min_marks),
                ));
            }
            if !program.min_entry_test.is_finite() || program.min_entry_test < 0.0 {
                issues.push(ValidationIssue::error(
                    uid,
                    Some(pid),
                    format!("min_entry_test must be non-negative, got {}", program.min_entry_test),
                ));
            }

            if program.cutoff_scale == Some(CutoffScale::Raw) && program.last_year_cutoff <= 100.0
            {
                issues.push(ValidationIssue::warning(
                    uid,
                    pid,
                    format!(
                        "raw cutoff {} looks like a percentage and will be halved",
                        program.last_year_cutoff
                    ),
                ));
            }
            if program.cutoff_scale.is_none()
                && program.last_year_cutoff > 0.0
                && program.last_year_cutoff <= 100.0
                && program.min_entry_test > 100.0
            {
                issues.push(ValidationIssue::warning(
                    uid,
                    pid,
                    format!(
                        "cutoff {} is read as a percentage but min_entry_test {} looks like raw points; set cutoff_scale",
                        program.last_year_cutoff, program.min_entry_test
                    ),
                ));
            }
            if program.last_year_cutoff > 0.0 && program.normalized_cutoff() > 100.0 {
                issues.push(ValidationIssue::warning(
                    uid,
                    pid,
                    format!(
                        "normalized cutoff {} is above 100 and cannot be reached",
                        program.normalized_cutoff()
                    ),
                ));
            }
            if program.seats == 0 {
                issues.push(ValidationIssue::warning(uid, pid, "seats is 0".into()));
            }
        }
    }

    issues
}
