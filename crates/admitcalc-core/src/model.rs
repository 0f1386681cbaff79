//! Core data model types for admitcalc.
//!
//! Universities own their programs; scoring outputs (`ScoreResult`,
//! `CalculationResult`) are derived per evaluation and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog-authored competitiveness of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    /// Flat percentage delta applied after tiering.
    pub fn adjustment(self) -> i32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 0,
            Difficulty::Hard => -5,
            Difficulty::VeryHard => -15,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::VeryHard => write!(f, "very_hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "very_hard" | "veryhard" => Ok(Difficulty::VeryHard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Scale on which a program's `last_year_cutoff` is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffScale {
    /// 0–100 aggregate, compared as-is.
    Percentage,
    /// Point-based aggregate, halved before comparison.
    Raw,
}

impl CutoffScale {
    /// Magnitude-based inference used when a program does not declare a scale.
    pub fn infer(cutoff: f64) -> Self {
        if cutoff > 100.0 {
            CutoffScale::Raw
        } else {
            CutoffScale::Percentage
        }
    }

    pub fn normalize(self, cutoff: f64) -> f64 {
        match self {
            CutoffScale::Percentage => cutoff,
            CutoffScale::Raw => cutoff / 2.0,
        }
    }
}

/// Public or private charter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    #[default]
    Public,
    Private,
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sector::Public => write!(f, "public"),
            Sector::Private => write!(f, "private"),
        }
    }
}

/// A single degree track at one university.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Identifier, unique within the owning university.
    pub id: String,
    pub name: String,
    pub short_name: String,
    /// Minimum academic percentage for eligibility.
    pub min_marks: f64,
    /// Minimum raw entry-test score for eligibility.
    pub min_entry_test: f64,
    pub marks_weight: u32,
    pub entry_test_weight: u32,
    /// Approximate intake; display only.
    #[serde(default)]
    pub seats: u32,
    pub last_year_cutoff: f64,
    /// Explicit cutoff scale. When absent the scale is inferred from magnitude.
    #[serde(default)]
    pub cutoff_scale: Option<CutoffScale>,
    pub difficulty: Difficulty,
}

impl Program {
    pub fn effective_cutoff_scale(&self) -> CutoffScale {
        self.cutoff_scale
            .unwrap_or_else(|| CutoffScale::infer(self.last_year_cutoff))
    }

    /// Last year's cutoff on the 0–100 aggregate scale.
    pub fn normalized_cutoff(&self) -> f64 {
        self.effective_cutoff_scale()
            .normalize(self.last_year_cutoff)
    }

    /// Widened so user-supplied weights cannot overflow.
    pub fn weights_sum(&self) -> u64 {
        u64::from(self.marks_weight) + u64::from(self.entry_test_weight)
    }
}

/// A university and its programs in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    pub id: String,
    pub name: String,
    pub short_name: String,
    /// Brand color; display only.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub sector: Sector,
    #[serde(default)]
    pub programs: Vec<Program>,
}

impl University {
    pub fn program(&self, program_id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id == program_id)
    }
}

/// Discrete chance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    Low,
    VeryLow,
    Unlikely,
    NotEligible,
}

impl Tier {
    pub fn status(self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent Chance",
            Tier::Good => "Good Chance",
            Tier::Fair => "Fair Chance",
            Tier::Low => "Low Chance",
            Tier::VeryLow => "Very Low Chance",
            Tier::Unlikely => "Unlikely",
            Tier::NotEligible => "Not Eligible",
        }
    }

    pub fn color(self) -> TierColor {
        match self {
            Tier::Excellent => TierColor::Success,
            Tier::Good => TierColor::Primary,
            Tier::Fair => TierColor::Warning,
            Tier::Low => TierColor::Caution,
            Tier::VeryLow | Tier::Unlikely | Tier::NotEligible => TierColor::Danger,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status())
    }
}

/// Semantic color key attached to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierColor {
    Success,
    Primary,
    Warning,
    Caution,
    Danger,
}

impl TierColor {
    pub fn hex(self) -> &'static str {
        match self {
            TierColor::Success => "#10B981",
            TierColor::Primary => "#3B82F6",
            TierColor::Warning => "#F59E0B",
            TierColor::Caution => "#F97316",
            TierColor::Danger => "#EF4444",
        }
    }
}

/// Outcome of scoring one program against one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Always within `[5, 95]`.
    pub percentage: u8,
    pub tier: Tier,
    pub status: String,
    /// Hex color for the tier.
    pub color: String,
    pub recommendations: Vec<String>,
    /// Weighted marks/entry-test aggregate on the 0–100 scale.
    pub aggregate: f64,
    /// `aggregate / normalized cutoff`; `None` when an eligibility gate failed.
    #[serde(default)]
    pub ratio: Option<f64>,
}

impl ScoreResult {
    pub fn is_eligible(&self) -> bool {
        self.tier != Tier::NotEligible
    }
}

/// A scored (university, program) pair, the unit ranked and displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub university_id: String,
    pub university_name: String,
    pub university_short_name: String,
    pub program_id: String,
    pub program_name: String,
    pub program_short_name: String,
    #[serde(flatten)]
    pub score: ScoreResult,
}

impl CalculationResult {
    pub fn new(university: &University, program: &Program, score: ScoreResult) -> Self {
        Self {
            university_id: university.id.clone(),
            university_name: university.name.clone(),
            university_short_name: university.short_name.clone(),
            program_id: program.id.clone(),
            program_name: program.name.clone(),
            program_short_name: program.short_name.clone(),
            score,
        }
    }

    pub fn percentage(&self) -> u8 {
        self.score.percentage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::VeryHard.to_string(), "very_hard");
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(
            "Very-Hard".parse::<Difficulty>().unwrap(),
            Difficulty::VeryHard
        );
        assert_eq!("veryhard".parse::<Difficulty>().unwrap(), Difficulty::VeryHard);
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_adjustments() {
        assert_eq!(Difficulty::Easy.adjustment(), 10);
        assert_eq!(Difficulty::Medium.adjustment(), 0);
        assert_eq!(Difficulty::Hard.adjustment(), -5);
        assert_eq!(Difficulty::VeryHard.adjustment(), -15);
    }

    #[test]
    fn cutoff_scale_inference_matches_magnitude_rule() {
        assert_eq!(CutoffScale::infer(100.0), CutoffScale::Percentage);
        assert_eq!(CutoffScale::infer(100.5), CutoffScale::Raw);
        assert_eq!(CutoffScale::Raw.normalize(168.0), 84.0);
        assert_eq!(CutoffScale::Percentage.normalize(70.0), 70.0);
    }

    #[test]
    fn explicit_scale_overrides_inference() {
        let mut program = Program {
            id: "cs".into(),
            name: "Computer Science".into(),
            short_name: "CS".into(),
            min_marks: 60.0,
            min_entry_test: 50.0,
            marks_weight: 50,
            entry_test_weight: 50,
            seats: 100,
            last_year_cutoff: 90.0,
            cutoff_scale: None,
            difficulty: Difficulty::Medium,
        };
        assert_eq!(program.normalized_cutoff(), 90.0);
        program.cutoff_scale = Some(CutoffScale::Raw);
        assert_eq!(program.normalized_cutoff(), 45.0);
    }

    #[test]
    fn calculation_result_serializes_flat() {
        let score = ScoreResult {
            percentage: 55,
            tier: Tier::Fair,
            status: Tier::Fair.status().into(),
            color: Tier::Fair.color().hex().into(),
            recommendations: vec![],
            aggregate: 70.0,
            ratio: Some(1.0),
        };
        let result = CalculationResult {
            university_id: "u".into(),
            university_name: "U".into(),
            university_short_name: "U".into(),
            program_id: "p".into(),
            program_name: "P".into(),
            program_short_name: "P".into(),
            score,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["percentage"], 55);
        assert_eq!(json["status"], "Fair Chance");
        assert_eq!(json["tier"], "fair");
        let back: CalculationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
