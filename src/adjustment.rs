//! Adaptive daily-target correction from recent adherence
//!
//! A dead-band policy: small average deviations are treated as noise and the
//! target is returned unchanged. Past the dead-band, one seventh of the
//! average daily deviation is folded back into the target so a week of
//! consistent drift is recovered over the following week. The corrected
//! target is clamped to a fixed band independent of the sex-based floors in
//! the energy module; the two bounds intentionally coexist (see DESIGN.md).

use crate::models::{CalorieTarget, DailyTracking, FitnessGoal, GoalType};

/// Average daily deviation below which no correction is applied
pub const DEAD_BAND_KCAL: f64 = 100.0;

/// Clamp band for adjusted targets
pub const ADJUSTED_TARGET_MIN_KCAL: f64 = 1200.0;
pub const ADJUSTED_TARGET_MAX_KCAL: f64 = 4000.0;

/// Smart target adjustment engine
pub struct SmartAdjuster;

impl SmartAdjuster {
    /// Correct a daily target from a window of recent tracking
    ///
    /// Returns the target unchanged (no `adjustment_reason`) when the window
    /// is empty or the average deviation is within the dead-band.
    pub fn smart_adjustment(
        recent_days: &[DailyTracking],
        current_target: &CalorieTarget,
        goal: &FitnessGoal,
    ) -> CalorieTarget {
        if recent_days.is_empty() {
            return current_target.clone();
        }

        let avg_deviation: f64 =
            recent_days.iter().map(|d| d.deviation()).sum::<f64>() / recent_days.len() as f64;

        if avg_deviation.abs() <= DEAD_BAND_KCAL {
            return current_target.clone();
        }

        let correction = avg_deviation / 7.0;
        let adjusted = (current_target.daily_target - correction)
            .round()
            .clamp(ADJUSTED_TARGET_MIN_KCAL, ADJUSTED_TARGET_MAX_KCAL);

        let reason = Self::describe(avg_deviation, goal);

        CalorieTarget {
            bmr: current_target.bmr,
            tdee: current_target.tdee,
            daily_target: adjusted,
            adjustment_reason: Some(reason),
        }
    }

    fn describe(avg_deviation: f64, goal: &FitnessGoal) -> String {
        let goal_word = match goal.goal_type {
            GoalType::LoseWeight => "weight-loss",
            GoalType::GainWeight => "weight-gain",
            GoalType::MaintainWeight => "maintenance",
        };

        if avg_deviation > 0.0 {
            format!(
                "Lowered target: averaging {:.0} kcal/day over target, spread across the coming week to keep the {} plan on track",
                avg_deviation, goal_word
            )
        } else {
            format!(
                "Raised target: averaging {:.0} kcal/day under target, spread across the coming week to keep the {} plan on track",
                avg_deviation.abs(), goal_word
            )
        }
    }
}
