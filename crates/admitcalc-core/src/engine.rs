//! Evaluation orchestrator.
//!
//! Expands a selection into candidates, scores each one, and ranks the
//! results. Unknown selections yield an empty list; malformed numbers yield an
//! [`InputError`] and no results at all.

use serde::{Deserialize, Serialize};

use crate::calculator::{score_validated, validate_inputs};
use crate::catalog::{Candidate, Catalog};
use crate::error::InputError;
use crate::model::CalculationResult;

/// Which part of the catalog to evaluate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub university_id: Option<String>,
    #[serde(default)]
    pub program_id: Option<String>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn university(university_id: impl Into<String>) -> Self {
        Self {
            university_id: Some(university_id.into()),
            program_id: None,
        }
    }

    pub fn program(university_id: impl Into<String>, program_id: impl Into<String>) -> Self {
        Self {
            university_id: Some(university_id.into()),
            program_id: Some(program_id.into()),
        }
    }
}

/// A student's numbers plus an optional catalog selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Academic percentage, 0–100.
    pub marks: f64,
    /// Raw entry-test score, 0–`test_max`.
    pub test_score: f64,
    pub test_max: f64,
    #[serde(default)]
    pub selection: Selection,
}

impl EvaluationRequest {
    pub fn new(marks: f64, test_score: f64, test_max: f64) -> Self {
        Self {
            marks,
            test_score,
            test_max,
            selection: Selection::default(),
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn validate(&self) -> Result<(), InputError> {
        validate_inputs(self.marks, self.test_score, self.test_max)
    }
}

/// Stateless evaluator over a borrowed catalog.
pub struct EvaluationEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> EvaluationEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Candidate set for a selection, in catalog order.
    pub fn candidates(&self, selection: &Selection) -> Vec<Candidate<'a>> {
        match (&selection.university_id, &selection.program_id) {
            (Some(university_id), Some(program_id)) => self
                .catalog
                .candidate(university_id, program_id)
                .into_iter()
                .collect(),
            (Some(university_id), None) => self.catalog.candidates_for_university(university_id),
            (None, Some(program_id)) => self.catalog.candidates_for_program(program_id),
            (None, None) => self.catalog.all_candidates(),
        }
    }

    /// Score and rank every candidate for the request.
    ///
    /// Results are sorted by percentage, highest first. Equal percentages keep
    /// catalog order. The list is never truncated.
    pub fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<Vec<CalculationResult>, InputError> {
        request.validate()?;

        let candidates = self.candidates(&request.selection);
        if candidates.is_empty() {
            tracing::debug!(
                university = ?request.selection.university_id,
                program = ?request.selection.program_id,
                "selection matched no programs"
            );
        }

        let mut results: Vec<CalculationResult> = candidates
            .into_iter()
            .map(|Candidate { university, program }| {
                let score = score_validated(
                    request.marks,
                    request.test_score,
                    request.test_max,
                    program,
                );
                CalculationResult::new(university, program, score)
            })
            .collect();

        rank(&mut results);

        tracing::debug!(
            catalog = self.catalog.id(),
            results = results.len(),
            eligible = results.iter().filter(|r| r.score.is_eligible()).count(),
            "evaluation complete"
        );

        Ok(results)
    }
}

/// Stable sort by percentage, descending.
pub fn rank(results: &mut [CalculationResult]) {
    results.sort_by(|a, b| b.percentage().cmp(&a.percentage()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tier;

    fn engine_catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn single_program_selection() {
        let catalog = engine_catalog();
        let engine = EvaluationEngine::new(&catalog);
        let request =
            EvaluationRequest::new(85.0, 140.0, 200.0).with_selection(Selection::program("nust", "cs"));
        let results = engine.evaluate(&request).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].university_short_name, "NUST");
        assert_eq!(results[0].score.tier, Tier::VeryLow);
        assert_eq!(results[0].percentage(), 5);
    }

    #[test]
    fn university_selection_covers_its_programs() {
        let catalog = engine_catalog();
        let engine = EvaluationEngine::new(&catalog);
        let request =
            EvaluationRequest::new(90.0, 190.0, 200.0).with_selection(Selection::university("comsats"));
        let results = engine.evaluate(&request).unwrap();
        let expected = catalog.university("comsats").unwrap().programs.len();
        assert_eq!(results.len(), expected);
        assert!(results.iter().all(|r| r.university_id == "comsats"));
    }

    #[test]
    fn program_only_selection_spans_universities() {
        let catalog = engine_catalog();
        let engine = EvaluationEngine::new(&catalog);
        let request = EvaluationRequest::new(90.0, 190.0, 200.0).with_selection(Selection {
            university_id: None,
            program_id: Some("cs".into()),
        });
        let results = engine.evaluate(&request).unwrap();
        assert!(results.len() > 1);
        assert!(results.iter().all(|r| r.program_id == "cs"));
    }

    #[test]
    fn unknown_selection_is_empty_not_error() {
        let catalog = engine_catalog();
        let engine = EvaluationEngine::new(&catalog);
        for selection in [
            Selection::university("nowhere"),
            Selection::program("nust", "astrology"),
            Selection::program("nowhere", "cs"),
        ] {
            let request = EvaluationRequest::new(85.0, 150.0, 200.0).with_selection(selection);
            assert!(engine.evaluate(&request).unwrap().is_empty());
        }
    }

    #[test]
    fn invalid_input_returns_no_results() {
        let catalog = engine_catalog();
        let engine = EvaluationEngine::new(&catalog);
        let request = EvaluationRequest::new(85.0, 150.0, -1.0);
        assert_eq!(
            engine.evaluate(&request),
            Err(InputError::TestMaxNotPositive)
        );
    }

    #[test]
    fn request_serde_defaults_selection() {
        let request: EvaluationRequest =
            serde_json::from_str(r#"{"marks": 80, "test_score": 150, "test_max": 200}"#).unwrap();
        assert_eq!(request.selection, Selection::all());
    }
}
