//! Evaluation reports with JSON persistence and run-to-run comparison.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogSummary};
use crate::engine::EvaluationRequest;
use crate::model::CalculationResult;

/// A ranked evaluation, ready to render or save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The inputs the results were computed from.
    pub request: EvaluationRequest,
    /// Which catalog was evaluated.
    pub catalog: CatalogSummary,
    /// Ranked results, highest percentage first.
    pub results: Vec<CalculationResult>,
}

impl EvaluationReport {
    pub fn new(
        catalog: &Catalog,
        request: EvaluationRequest,
        results: Vec<CalculationResult>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            request,
            catalog: catalog.summary(),
            results,
        }
    }

    /// The first `n` results.
    pub fn top(&self, n: usize) -> &[CalculationResult] {
        &self.results[..n.min(self.results.len())]
    }

    pub fn best(&self) -> Option<&CalculationResult> {
        self.results.first()
    }

    pub fn eligible_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.score.is_eligible())
            .count()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against an earlier one, program by program.
    pub fn compare(&self, baseline: &EvaluationReport) -> ReportComparison {
        let key = |r: &CalculationResult| (r.university_id.clone(), r.program_id.clone());

        let baseline_map: HashMap<(String, String), &CalculationResult> =
            baseline.results.iter().map(|r| (key(r), r)).collect();
        let current_keys: std::collections::HashSet<(String, String)> =
            self.results.iter().map(key).collect();

        let mut improved = Vec::new();
        let mut declined = Vec::new();
        let mut unchanged = 0usize;
        let mut new_programs = 0usize;

        for current in &self.results {
            let Some(previous) = baseline_map.get(&key(current)) else {
                new_programs += 1;
                continue;
            };
            let change = ChanceChange {
                university_id: current.university_id.clone(),
                program_id: current.program_id.clone(),
                baseline_percentage: previous.percentage(),
                current_percentage: current.percentage(),
                baseline_status: previous.score.status.clone(),
                current_status: current.score.status.clone(),
            };
            match change.delta() {
                d if d > 0 => improved.push(change),
                d if d < 0 => declined.push(change),
                _ => unchanged += 1,
            }
        }

        let removed_programs = baseline_map
            .keys()
            .filter(|k| !current_keys.contains(*k))
            .count();

        ReportComparison {
            improved,
            declined,
            unchanged,
            new_programs,
            removed_programs,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportComparison {
    pub improved: Vec<ChanceChange>,
    pub declined: Vec<ChanceChange>,
    pub unchanged: usize,
    /// Programs in current but not baseline.
    pub new_programs: usize,
    /// Programs in baseline but not current.
    pub removed_programs: usize,
}

/// One program whose chance moved between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChanceChange {
    pub university_id: String,
    pub program_id: String,
    pub baseline_percentage: u8,
    pub current_percentage: u8,
    pub baseline_status: String,
    pub current_status: String,
}

impl ChanceChange {
    pub fn delta(&self) -> i16 {
        i16::from(self.current_percentage) - i16::from(self.baseline_percentage)
    }
}

impl ReportComparison {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} improved, {} declined, {} unchanged\n\n",
            self.improved.len(),
            self.declined.len(),
            self.unchanged
        ));

        for (title, changes) in [("Improved", &self.improved), ("Declined", &self.declined)] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Program | Before | After | Delta |\n");
            md.push_str("|---------|--------|-------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {}/{} | {}% ({}) | {}% ({}) | {:+}% |\n",
                    c.university_id,
                    c.program_id,
                    c.baseline_percentage,
                    c.baseline_status,
                    c.current_percentage,
                    c.current_status,
                    c.delta()
                ));
            }
            md.push('\n');
        }

        md
    }

    pub fn has_declines(&self) -> bool {
        !self.declined.is_empty()
    }
}
