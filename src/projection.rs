//! Goal-completion projection from recent adherence
//!
//! The recent calorie deviation is converted into an implied weekly
//! weight-change rate at the fixed 3500 kcal/lb conversion. When tracking
//! shows no deviation the planned rate stands in, so a user eating exactly
//! to target projects along their plan.

use crate::energy::KCAL_PER_LB;
use crate::error::{CalculationError, Result};
use crate::models::{DailyTracking, FitnessGoal};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Relative tolerance for the observed rate to count as on pace
const ON_PACE_TOLERANCE: f64 = 0.2;

/// Projected completion of a weight goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProjection {
    /// Days until the target weight at the projected rate
    pub estimated_days: i64,

    /// Calendar date of projected completion
    pub estimated_date: NaiveDate,

    /// Weekly rate used for the projection, in lbs/week
    pub weekly_rate_lbs: f64,

    /// True when the observed rate is within 20% of the planned rate
    pub on_pace: bool,
}

/// Goal completion projector
pub struct GoalProjector;

impl GoalProjector {
    /// Project when a goal will be reached, as of a reference date
    ///
    /// The observed rate comes from the mean daily calorie deviation over
    /// `recent_days`, scaled to a week and converted at 3500 kcal/lb. A zero
    /// observed rate falls back to the planned rate. Errors when neither
    /// rate is usable (already at target returns a zero-day projection).
    pub fn predict_goal_completion(
        current_weight_lbs: f64,
        target_weight_lbs: f64,
        recent_days: &[DailyTracking],
        goal: &FitnessGoal,
        as_of: NaiveDate,
    ) -> Result<GoalProjection> {
        let remaining_lbs = (target_weight_lbs - current_weight_lbs).abs();

        let observed_rate = Self::observed_weekly_rate(recent_days);
        let planned_rate = goal.weekly_goal_lbs.abs();

        let weekly_rate_lbs = if observed_rate.abs() > f64::EPSILON {
            observed_rate.abs()
        } else {
            planned_rate
        };

        if remaining_lbs < f64::EPSILON {
            return Ok(GoalProjection {
                estimated_days: 0,
                estimated_date: as_of,
                weekly_rate_lbs,
                on_pace: true,
            });
        }

        if weekly_rate_lbs < f64::EPSILON {
            return Err(CalculationError::NoRate {
                calculation: "goal completion projection".to_string(),
            }
            .into());
        }

        let estimated_days = (remaining_lbs / weekly_rate_lbs * 7.0).ceil() as i64;
        let estimated_date = as_of + Duration::days(estimated_days);

        let on_pace = if planned_rate < f64::EPSILON {
            true
        } else {
            (weekly_rate_lbs - planned_rate).abs() / planned_rate <= ON_PACE_TOLERANCE
        };

        Ok(GoalProjection {
            estimated_days,
            estimated_date,
            weekly_rate_lbs,
            on_pace,
        })
    }

    /// Implied weekly weight-change rate from tracked calorie deviations
    fn observed_weekly_rate(recent_days: &[DailyTracking]) -> f64 {
        if recent_days.is_empty() {
            return 0.0;
        }

        let avg_daily_deviation: f64 =
            recent_days.iter().map(|d| d.deviation()).sum::<f64>() / recent_days.len() as f64;

        avg_daily_deviation * 7.0 / KCAL_PER_LB
    }
}
