//! Read-only store of universities and their programs.
//!
//! A [`Catalog`] is built once from authored data and validated on the way in;
//! afterwards it only hands out shared borrows.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::{Program, University};
use crate::parser::{self, CatalogFile, Severity};

/// TOML source of the catalog compiled into the binary.
pub const BUILTIN_CATALOG_TOML: &str = include_str!("../catalogs/builtin.toml");

/// A (university, program) pair eligible for scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub university: &'a University,
    pub program: &'a Program,
}

/// Immutable, validated catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    id: String,
    name: String,
    description: String,
    universities: Vec<University>,
}

/// Summary of a catalog (without the program definitions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
    pub university_count: usize,
    pub program_count: usize,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let file = parser::parse_catalog_str(BUILTIN_CATALOG_TOML, Path::new("builtin.toml"))?;
        Ok(Self::try_from(file)?)
    }

    /// Load and freeze a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = parser::parse_catalog(path)?;
        Self::try_from(file).with_context(|| format!("invalid catalog: {}", path.display()))
    }

    /// Freeze an in-memory list of universities.
    pub fn from_universities(
        id: impl Into<String>,
        name: impl Into<String>,
        universities: Vec<University>,
    ) -> Result<Self, CatalogError> {
        Self::try_from(CatalogFile {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            universities,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn universities(&self) -> &[University] {
        &self.universities
    }

    pub fn university(&self, university_id: &str) -> Option<&University> {
        self.universities.iter().find(|u| u.id == university_id)
    }

    pub fn program_count(&self) -> usize {
        self.universities.iter().map(|u| u.programs.len()).sum()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            university_count: self.universities.len(),
            program_count: self.program_count(),
        }
    }

    /// Every (university, program) pair in catalog order.
    pub fn all_candidates(&self) -> Vec<Candidate<'_>> {
        self.universities
            .iter()
            .flat_map(|university| {
                university
                    .programs
                    .iter()
                    .map(move |program| Candidate { university, program })
            })
            .collect()
    }

    /// All programs of one university in catalog order; empty if unknown.
    pub fn candidates_for_university(&self, university_id: &str) -> Vec<Candidate<'_>> {
        self.university(university_id)
            .map(|university| {
                university
                    .programs
                    .iter()
                    .map(|program| Candidate { university, program })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A single program; `None` if either id is unknown.
    pub fn candidate(&self, university_id: &str, program_id: &str) -> Option<Candidate<'_>> {
        let university = self.university(university_id)?;
        let program = university.program(program_id)?;
        Some(Candidate { university, program })
    }

    /// Programs with this id across every university, in catalog order.
    pub fn candidates_for_program(&self, program_id: &str) -> Vec<Candidate<'_>> {
        self.universities
            .iter()
            .filter_map(|university| {
                university
                    .program(program_id)
                    .map(|program| Candidate { university, program })
            })
            .collect()
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        let mut defects = Vec::new();
        for issue in parser::validate_catalog(&file) {
            match issue.severity {
                Severity::Error => defects.push(format!("{}: {}", issue.location(), issue.message)),
                Severity::Warning => {
                    tracing::warn!(catalog = %file.id, "{}: {}", issue.location(), issue.message)
                }
            }
        }
        if !defects.is_empty() {
            return Err(CatalogError::Invalid(defects));
        }

        Ok(Self {
            id: file.id,
            name: file.name,
            description: file.description,
            universities: file.universities,
        })
    }
}
