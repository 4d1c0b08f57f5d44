//! Energy expenditure and calorie target calculations
//!
//! BMR uses the Mifflin-St Jeor equation with imperial inputs converted to
//! metric internally. Daily targets derive a deficit or surplus from the
//! planned weekly weight change at the fixed 3500 kcal/lb conversion. Every
//! function is a deterministic, side-effect-free transform; out-of-range
//! results are clamped, never rejected.

use crate::models::{ActivityLevel, CalorieTarget, FitnessGoal, GoalType, Sex, UserProfile};

/// Fixed conversion between stored body fat and dietary energy
pub const KCAL_PER_LB: f64 = 3500.0;

/// Hard intake floors for weight-loss targets, by sex
pub const MIN_DAILY_KCAL_FEMALE: f64 = 1200.0;
pub const MIN_DAILY_KCAL_MALE: f64 = 1500.0;

const KG_PER_LB: f64 = 0.453592;
const CM_PER_INCH: f64 = 2.54;

/// Calorie and energy expenditure calculator
pub struct CalorieCalculator;

impl CalorieCalculator {
    /// Body Mass Index from imperial measurements
    ///
    /// `703 * weight / height^2` with weight in pounds and height in inches.
    pub fn calculate_bmi(height_in: f64, weight_lbs: f64) -> f64 {
        703.0 * weight_lbs / (height_in * height_in)
    }

    /// Basal metabolic rate via Mifflin-St Jeor
    ///
    /// male:   10*kg + 6.25*cm - 5*age + 5
    /// female: 10*kg + 6.25*cm - 5*age - 161
    pub fn calculate_bmr(weight_lbs: f64, height_in: f64, age_years: u8, sex: Sex) -> f64 {
        let weight_kg = weight_lbs * KG_PER_LB;
        let height_cm = height_in * CM_PER_INCH;
        let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;

        match sex {
            Sex::Male => base + 5.0,
            Sex::Female => base - 161.0,
        }
    }

    /// Total daily energy expenditure: BMR scaled by activity multiplier
    pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
        (bmr * activity_level.multiplier()).round()
    }

    /// Daily calorie target for a profile pursuing a goal
    ///
    /// The weekly goal is spread over seven days at 3500 kcal/lb. Loss
    /// targets are clamped to a sex-based intake floor; gain targets are
    /// uncapped; maintenance returns TDEE unchanged.
    pub fn daily_calorie_target(profile: &UserProfile, goal: &FitnessGoal) -> CalorieTarget {
        let bmr = Self::calculate_bmr(
            profile.weight_lbs,
            profile.height_in,
            profile.age_years,
            profile.sex,
        );
        let tdee = Self::calculate_tdee(bmr, profile.activity_level);

        let daily_delta = goal.weekly_goal_lbs * KCAL_PER_LB / 7.0;

        let daily_target = match goal.goal_type {
            GoalType::LoseWeight => {
                let floor = match profile.sex {
                    Sex::Female => MIN_DAILY_KCAL_FEMALE,
                    Sex::Male => MIN_DAILY_KCAL_MALE,
                };
                (tdee - daily_delta).max(floor).round()
            }
            GoalType::GainWeight => (tdee + daily_delta).round(),
            GoalType::MaintainWeight => tdee,
        };

        CalorieTarget {
            bmr,
            tdee,
            daily_target,
            adjustment_reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_profile(sex: Sex) -> UserProfile {
        UserProfile {
            age_years: 30,
            sex,
            height_in: 70.0,
            weight_lbs: 154.3, // ~70 kg
            activity_level: ActivityLevel::Moderate,
        }
    }

    fn test_goal(goal_type: GoalType, weekly_goal_lbs: f64) -> FitnessGoal {
        FitnessGoal {
            goal_type,
            target_weight_lbs: 145.0,
            weekly_goal_lbs,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            target_date: None,
        }
    }

    #[test]
    fn test_bmi() {
        // 703 * 154 / 70^2 = 22.09...
        let bmi = CalorieCalculator::calculate_bmi(70.0, 154.0);
        assert!((bmi - 22.094).abs() < 0.01);
    }

    #[test]
    fn test_bmr_male() {
        // 70 kg, 177.8 cm, age 30:
        // 10*70 + 6.25*177.8 - 5*30 + 5 = 700 + 1111.25 - 150 + 5 = 1666.25
        let bmr = CalorieCalculator::calculate_bmr(70.0 / 0.453592, 70.0, 30, Sex::Male);
        assert!((bmr - 1666.25).abs() < 0.01);
    }

    #[test]
    fn test_bmr_sex_offset_is_166() {
        let male = CalorieCalculator::calculate_bmr(154.3, 70.0, 30, Sex::Male);
        let female = CalorieCalculator::calculate_bmr(154.3, 70.0, 30, Sex::Female);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_moderate() {
        assert_eq!(CalorieCalculator::calculate_tdee(1500.0, ActivityLevel::Moderate), 2325.0);
    }

    #[test]
    fn test_tdee_rounds() {
        // 1666.25 * 1.2 = 1999.5 -> 2000
        assert_eq!(CalorieCalculator::calculate_tdee(1666.25, ActivityLevel::Sedentary), 2000.0);
    }

    #[test]
    fn test_lose_weight_target() {
        let profile = test_profile(Sex::Male);
        let goal = test_goal(GoalType::LoseWeight, 1.0);

        let target = CalorieCalculator::daily_calorie_target(&profile, &goal);
        assert!((target.daily_target - (target.tdee - 500.0).round()).abs() < 1.0);
        assert!(target.adjustment_reason.is_none());
    }

    #[test]
    fn test_lose_weight_floor_female() {
        let profile = test_profile(Sex::Female);
        // Absurdly aggressive 10 lbs/week would put the target far below the floor
        let goal = test_goal(GoalType::LoseWeight, 10.0);

        let target = CalorieCalculator::daily_calorie_target(&profile, &goal);
        assert_eq!(target.daily_target, 1200.0);
    }

    #[test]
    fn test_lose_weight_floor_male() {
        let profile = test_profile(Sex::Male);
        let goal = test_goal(GoalType::LoseWeight, 10.0);

        let target = CalorieCalculator::daily_calorie_target(&profile, &goal);
        assert_eq!(target.daily_target, 1500.0);
    }

    #[test]
    fn test_gain_weight_uncapped() {
        let profile = test_profile(Sex::Male);
        let goal = test_goal(GoalType::GainWeight, 2.0);

        let target = CalorieCalculator::daily_calorie_target(&profile, &goal);
        assert_eq!(target.daily_target, (target.tdee + 1000.0).round());
    }

    #[test]
    fn test_maintain_weight_returns_tdee() {
        let profile = test_profile(Sex::Female);
        let goal = test_goal(GoalType::MaintainWeight, 0.0);

        let target = CalorieCalculator::daily_calorie_target(&profile, &goal);
        assert_eq!(target.daily_target, target.tdee);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_lose_target_never_below_floor(
            age in 18u8..80u8,
            height in 48.0f64..96.0f64,
            weight in 90.0f64..350.0f64,
            weekly in 0.0f64..15.0f64
        ) {
            let profile = UserProfile {
                age_years: age,
                sex: Sex::Female,
                height_in: height,
                weight_lbs: weight,
                activity_level: ActivityLevel::Sedentary,
            };
            let goal = test_goal(GoalType::LoseWeight, weekly);

            let target = CalorieCalculator::daily_calorie_target(&profile, &goal);
            prop_assert!(target.daily_target >= MIN_DAILY_KCAL_FEMALE);
        }

        #[test]
        fn test_bmr_increases_with_weight(
            weight in 90.0f64..349.0f64,
        ) {
            let lighter = CalorieCalculator::calculate_bmr(weight, 70.0, 30, Sex::Male);
            let heavier = CalorieCalculator::calculate_bmr(weight + 1.0, 70.0, 30, Sex::Male);
            prop_assert!(heavier > lighter);
        }
    }
}
