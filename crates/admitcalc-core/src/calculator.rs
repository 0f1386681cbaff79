//! Admission chance scoring.
//!
//! `calculate` turns a student's marks and entry-test score into a
//! [`ScoreResult`] for one program. It is pure: no I/O, no shared state, and
//! identical inputs always give identical output.

use crate::error::{InputError, InputField};
use crate::model::{Difficulty, Program, ScoreResult, Tier};

/// Lowest percentage the engine will ever report.
pub const MIN_PERCENTAGE: i32 = 5;
/// Highest percentage the engine will ever report.
pub const MAX_PERCENTAGE: i32 = 95;

/// Adjusted percentage below which a very hard program gets an extra warning.
const HIGHLY_COMPETITIVE_BELOW: i32 = 40;

/// One row of the ratio → tier table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRule {
    /// Inclusive lower bound on `aggregate / normalized cutoff`.
    pub min_ratio: f64,
    pub tier: Tier,
    /// Percentage before the difficulty adjustment.
    pub percentage: i32,
    pub recommendation: &'static str,
}

/// Ordered from the most to the least favorable tier. The last row matches
/// every ratio.
pub const TIERS: [TierRule; 6] = [
    TierRule {
        min_ratio: 1.15,
        tier: Tier::Excellent,
        percentage: 90,
        recommendation: "Your aggregate is well above last year's cutoff. Prepare your documents and apply early.",
    },
    TierRule {
        min_ratio: 1.05,
        tier: Tier::Good,
        percentage: 75,
        recommendation: "You are above last year's cutoff. Apply and keep an eye on the merit lists.",
    },
    TierRule {
        min_ratio: 0.98,
        tier: Tier::Fair,
        percentage: 55,
        recommendation: "You are close to last year's cutoff. Apply, but add a few backup programs.",
    },
    TierRule {
        min_ratio: 0.92,
        tier: Tier::Low,
        percentage: 35,
        recommendation: "You are slightly below last year's cutoff. A better entry test score would help the most.",
    },
    TierRule {
        min_ratio: 0.85,
        tier: Tier::VeryLow,
        percentage: 20,
        recommendation: "You are well below last year's cutoff. Consider retaking the entry test or similar programs elsewhere.",
    },
    TierRule {
        min_ratio: f64::NEG_INFINITY,
        tier: Tier::Unlikely,
        percentage: 10,
        recommendation: "Admission is unlikely this cycle. Focus on programs with lower cutoffs.",
    },
];

const HIGHLY_COMPETITIVE: &str =
    "This program is highly competitive. Keep strong backup options ready.";

/// Look up the tier row for a cutoff ratio.
pub fn tier_for_ratio(ratio: f64) -> &'static TierRule {
    TIERS
        .iter()
        .find(|rule| ratio >= rule.min_ratio)
        .unwrap_or(&TIERS[TIERS.len() - 1])
}

/// Check the student's numbers before any scoring happens.
pub fn validate_inputs(marks: f64, test_score: f64, test_max: f64) -> Result<(), InputError> {
    for (field, value) in [
        (InputField::Marks, marks),
        (InputField::TestScore, test_score),
        (InputField::TestMax, test_max),
    ] {
        if !value.is_finite() {
            return Err(InputError::NonFinite { field });
        }
    }
    if test_max <= 0.0 {
        return Err(InputError::TestMaxNotPositive);
    }
    if !(0.0..=100.0).contains(&marks) {
        return Err(InputError::MarksOutOfRange(marks));
    }
    if !(0.0..=test_max).contains(&test_score) {
        return Err(InputError::TestScoreOutOfRange {
            score: test_score,
            max: test_max,
        });
    }
    Ok(())
}

/// Weighted marks/entry-test aggregate on the 0–100 scale.
pub fn aggregate(marks: f64, test_score: f64, test_max: f64, program: &Program) -> f64 {
    let entry_test_pct = test_score / test_max * 100.0;
    marks * f64::from(program.marks_weight) / 100.0
        + entry_test_pct * f64::from(program.entry_test_weight) / 100.0
}

/// Score one program against a student's marks and entry-test result.
pub fn calculate(
    marks: f64,
    test_score: f64,
    test_max: f64,
    program: &Program,
) -> Result<ScoreResult, InputError> {
    validate_inputs(marks, test_score, test_max)?;
    Ok(score_validated(marks, test_score, test_max, program))
}

/// Scoring body shared with the engine, which validates once per request.
pub(crate) fn score_validated(
    marks: f64,
    test_score: f64,
    test_max: f64,
    program: &Program,
) -> ScoreResult {
    let aggregate = aggregate(marks, test_score, test_max, program);

    let meets_marks = marks >= program.min_marks;
    let meets_test = test_score >= program.min_entry_test;
    if !meets_marks || !meets_test {
        let mut recommendations = Vec::new();
        if !meets_marks {
            recommendations.push(format!(
                "Minimum {}% marks required (you have {}%).",
                program.min_marks, marks
            ));
        }
        if !meets_test {
            recommendations.push(format!(
                "Minimum entry test score of {} required (you scored {}).",
                program.min_entry_test, test_score
            ));
        }
        return finish(Tier::NotEligible, MIN_PERCENTAGE, recommendations, aggregate, None);
    }

    let ratio = aggregate / program.normalized_cutoff();
    let rule = tier_for_ratio(ratio);
    let mut recommendations = vec![rule.recommendation.to_string()];

    let percentage = rule.percentage + program.difficulty.adjustment();
    if program.difficulty == Difficulty::VeryHard && percentage < HIGHLY_COMPETITIVE_BELOW {
        recommendations.push(HIGHLY_COMPETITIVE.to_string());
    }

    finish(rule.tier, percentage, recommendations, aggregate, Some(ratio))
}

fn finish(
    tier: Tier,
    percentage: i32,
    recommendations: Vec<String>,
    aggregate: f64,
    ratio: Option<f64>,
) -> ScoreResult {
    let percentage = percentage.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE);
    ScoreResult {
        percentage: percentage as u8,
        tier,
        status: tier.status().to_string(),
        color: tier.color().hex().to_string(),
        recommendations,
        aggregate,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CutoffScale, TierColor};

    fn program(
        min_marks: f64,
        min_entry_test: f64,
        marks_weight: u32,
        last_year_cutoff: f64,
        difficulty: Difficulty,
    ) -> Program {
        Program {
            id: "cs".into(),
            name: "Computer Science".into(),
            short_name: "CS".into(),
            min_marks,
            min_entry_test,
            marks_weight,
            entry_test_weight: 100 - marks_weight,
            seats: 100,
            last_year_cutoff,
            cutoff_scale: None,
            difficulty,
        }
    }

    fn nust_cs() -> Program {
        program(80.0, 140.0, 25, 168.0, Difficulty::VeryHard)
    }

    #[test]
    fn tier_table_boundaries_are_inclusive() {
        assert_eq!(tier_for_ratio(1.15).tier, Tier::Excellent);
        assert_eq!(tier_for_ratio(1.1499).tier, Tier::Good);
        assert_eq!(tier_for_ratio(1.05).tier, Tier::Good);
        assert_eq!(tier_for_ratio(0.98).tier, Tier::Fair);
        assert_eq!(tier_for_ratio(0.92).tier, Tier::Low);
        assert_eq!(tier_for_ratio(0.85).tier, Tier::VeryLow);
        assert_eq!(tier_for_ratio(0.8499).tier, Tier::Unlikely);
        assert_eq!(tier_for_ratio(0.0).tier, Tier::Unlikely);
    }

    #[test]
    fn tier_table_is_strictly_descending() {
        for pair in TIERS.windows(2) {
            assert!(pair[0].min_ratio > pair[1].min_ratio);
            assert!(pair[0].percentage > pair[1].percentage);
        }
    }

    #[test]
    fn very_hard_program_near_cutoff() {
        let result = calculate(85.0, 140.0, 200.0, &nust_cs()).unwrap();
        assert!((result.aggregate - 73.75).abs() < 1e-9);
        let ratio = result.ratio.unwrap();
        assert!((ratio - 73.75 / 84.0).abs() < 1e-9);
        assert_eq!(result.tier, Tier::VeryLow);
        assert_eq!(result.status, "Very Low Chance");
        assert_eq!(result.percentage, 5);
        assert_eq!(result.recommendations.len(), 2);
        assert!(result.recommendations[1].contains("highly competitive"));
    }

    #[test]
    fn failed_marks_gate_is_not_eligible() {
        let result = calculate(60.0, 40.0, 200.0, &nust_cs()).unwrap();
        assert_eq!(result.percentage, 5);
        assert_eq!(result.status, "Not Eligible");
        assert_eq!(result.tier, Tier::NotEligible);
        assert_eq!(result.color, TierColor::Danger.hex());
        assert!(result.ratio.is_none());
        assert!(result.recommendations[0].contains("80%"));
        assert!(result.recommendations[1].contains("140"));
    }

    #[test]
    fn gate_dominates_a_great_aggregate() {
        let easy = program(60.0, 150.0, 50, 40.0, Difficulty::Easy);
        let result = calculate(100.0, 149.0, 200.0, &easy).unwrap();
        assert_eq!(result.percentage, 5);
        assert_eq!(result.status, "Not Eligible");
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn medium_program_excellent_chance() {
        let comsats = program(60.0, 50.0, 50, 70.0, Difficulty::Medium);
        let result = calculate(90.0, 190.0, 200.0, &comsats).unwrap();
        assert!((result.aggregate - 92.5).abs() < 1e-9);
        assert_eq!(result.status, "Excellent Chance");
        assert_eq!(result.percentage, 90);
        assert_eq!(result.color, TierColor::Success.hex());
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn easy_adjustment_is_clamped_to_95() {
        let easy = program(50.0, 0.0, 50, 50.0, Difficulty::Easy);
        let result = calculate(95.0, 190.0, 200.0, &easy).unwrap();
        assert_eq!(result.tier, Tier::Excellent);
        assert_eq!(result.percentage, 95);
    }

    #[test]
    fn hard_adjustment_subtracts_five() {
        let hard = program(50.0, 0.0, 50, 70.0, Difficulty::Hard);
        let result = calculate(75.0, 150.0, 200.0, &hard).unwrap();
        // aggregate 75, ratio ~1.07
        assert_eq!(result.tier, Tier::Good);
        assert_eq!(result.percentage, 70);
    }

    #[test]
    fn very_hard_above_forty_has_no_extra_warning() {
        let vh = program(50.0, 0.0, 50, 70.0, Difficulty::VeryHard);
        let result = calculate(90.0, 190.0, 200.0, &vh).unwrap();
        assert_eq!(result.percentage, 75);
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn explicit_percentage_scale_skips_halving() {
        let mut p = program(0.0, 0.0, 100, 150.0, Difficulty::Medium);
        p.cutoff_scale = Some(CutoffScale::Percentage);
        let result = calculate(90.0, 0.0, 200.0, &p).unwrap();
        assert!((result.ratio.unwrap() - 0.6).abs() < 1e-9);
        assert_eq!(result.tier, Tier::Unlikely);
    }

    #[test]
    fn rejects_bad_inputs() {
        let p = nust_cs();
        assert_eq!(
            calculate(f64::NAN, 100.0, 200.0, &p),
            Err(InputError::NonFinite {
                field: InputField::Marks
            })
        );
        assert_eq!(
            calculate(80.0, f64::INFINITY, 200.0, &p),
            Err(InputError::NonFinite {
                field: InputField::TestScore
            })
        );
        assert_eq!(
            calculate(80.0, 100.0, 0.0, &p),
            Err(InputError::TestMaxNotPositive)
        );
        assert_eq!(
            calculate(101.0, 100.0, 200.0, &p),
            Err(InputError::MarksOutOfRange(101.0))
        );
        assert!(matches!(
            calculate(80.0, 201.0, 200.0, &p),
            Err(InputError::TestScoreOutOfRange { .. })
        ));
        assert!(matches!(
            calculate(80.0, -1.0, 200.0, &p),
            Err(InputError::TestScoreOutOfRange { .. })
        ));
    }

    #[test]
    fn deterministic() {
        let p = nust_cs();
        let a = calculate(88.5, 163.0, 200.0, &p).unwrap();
        let b = calculate(88.5, 163.0, 200.0, &p).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.aggregate.to_bits(), b.aggregate.to_bits());
    }
}
