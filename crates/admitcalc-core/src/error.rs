//! Error types for the admission engine.
//!
//! `InputError` is the only error the engine raises while evaluating. Catalog
//! defects are authoring bugs and surface as `CatalogError` when a catalog is
//! built, never mid-evaluation.

use thiserror::Error;

/// Which user-supplied number failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Marks,
    TestScore,
    TestMax,
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputField::Marks => write!(f, "marks"),
            InputField::TestScore => write!(f, "entry test score"),
            InputField::TestMax => write!(f, "entry test max"),
        }
    }
}

/// A rejected set of student inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// NaN or infinite input.
    #[error("{field} must be a finite number")]
    NonFinite { field: InputField },

    #[error("entry test max must be positive")]
    TestMaxNotPositive,

    #[error("marks must be between 0 and 100, got {0}")]
    MarksOutOfRange(f64),

    #[error("entry test score must be between 0 and {max}, got {score}")]
    TestScoreOutOfRange { score: f64, max: f64 },
}

impl InputError {
    /// The input field this error should be shown against.
    pub fn field(&self) -> InputField {
        match self {
            InputError::NonFinite { field } => *field,
            InputError::TestMaxNotPositive => InputField::TestMax,
            InputError::MarksOutOfRange(_) => InputField::Marks,
            InputError::TestScoreOutOfRange { .. } => InputField::TestScore,
        }
    }
}

/// A catalog that cannot be frozen into a usable [`crate::catalog::Catalog`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("catalog has {} defect(s): {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),
}
