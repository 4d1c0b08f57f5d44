use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biological sex used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => anyhow::bail!("Unknown sex: {}", s),
        }
    }
}

/// Daily activity levels for TDEE scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" | "lightly-active" => Ok(Self::Light),
            "moderate" | "moderately-active" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very-active" | "very_active" | "veryactive" => Ok(Self::VeryActive),
            _ => anyhow::bail!("Unknown activity level: {}", s),
        }
    }

    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    /// Human-readable description for display output
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary (little or no exercise)",
            Self::Light => "Lightly active (1-3 days/week)",
            Self::Moderate => "Moderately active (3-5 days/week)",
            Self::Active => "Active (6-7 days/week)",
            Self::VeryActive => "Very active (hard exercise daily)",
        }
    }
}

/// Weight management goal types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalType {
    LoseWeight,
    GainWeight,
    MaintainWeight,
}

impl GoalType {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lose" | "lose-weight" | "lose_weight" => Ok(Self::LoseWeight),
            "gain" | "gain-weight" | "gain_weight" => Ok(Self::GainWeight),
            "maintain" | "maintain-weight" | "maintain_weight" => Ok(Self::MaintainWeight),
            _ => anyhow::bail!("Unknown goal type: {}", s),
        }
    }
}

/// User profile supplying the inputs for energy calculations
///
/// Height and weight are stored in canonical imperial units (inches, pounds);
/// conversion from other units happens at the input boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in whole years
    pub age_years: u8,

    /// Biological sex
    pub sex: Sex,

    /// Height in inches (canonical unit)
    pub height_in: f64,

    /// Weight in pounds (canonical unit)
    pub weight_lbs: f64,

    /// Daily activity level
    pub activity_level: ActivityLevel,
}

/// A weight management goal with a planned weekly rate of change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessGoal {
    /// Direction of the goal
    pub goal_type: GoalType,

    /// Target body weight in pounds
    pub target_weight_lbs: f64,

    /// Planned magnitude of weekly weight change in pounds
    pub weekly_goal_lbs: f64,

    /// Date the goal was started
    pub start_date: NaiveDate,

    /// Optional deadline for reaching the target
    pub target_date: Option<NaiveDate>,
}

/// Derived calorie target for a single day
///
/// Never persisted; recomputed on demand from profile and goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieTarget {
    /// Basal metabolic rate in kcal/day
    pub bmr: f64,

    /// Total daily energy expenditure in kcal/day
    pub tdee: f64,

    /// Recommended daily intake in kcal/day
    pub daily_target: f64,

    /// Present when the target was corrected by the adjustment engine
    pub adjustment_reason: Option<String>,
}

/// One day of intake tracking, owned by the caller or a `ProfileStore`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTracking {
    /// Tracking date
    pub date: NaiveDate,

    /// Target intake for the day in kcal
    pub target_calories: f64,

    /// Actual intake logged for the day in kcal
    pub consumed_calories: f64,

    /// Target minus consumed
    pub remaining_calories: f64,

    /// True if the target was produced by the adjustment engine
    pub is_adjusted: bool,

    /// Reason string carried over from the adjustment, if any
    pub adjustment_reason: Option<String>,

    /// Unadjusted target, retained when `is_adjusted` is set
    pub original_target: Option<f64>,
}

impl DailyTracking {
    /// Create a day record, deriving the remaining balance
    pub fn new(date: NaiveDate, target_calories: f64, consumed_calories: f64) -> Self {
        DailyTracking {
            date,
            target_calories,
            consumed_calories,
            remaining_calories: target_calories - consumed_calories,
            is_adjusted: false,
            adjustment_reason: None,
            original_target: None,
        }
    }

    /// Signed deviation from target: positive when over target
    pub fn deviation(&self) -> f64 {
        self.consumed_calories - self.target_calories
    }
}

/// Supported height units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightUnit {
    Inches,
    Centimeters,
    FeetInches,
}

impl HeightUnit {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "cm" | "centimeters" => Ok(Self::Centimeters),
            "ft" | "feet" | "ft-in" => Ok(Self::FeetInches),
            _ => anyhow::bail!("Unknown height unit: {}", s),
        }
    }
}

/// A height measurement in a particular unit
///
/// For `FeetInches` the `value` field holds total inches and the optional
/// `feet`/`inches` fields carry the display decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightValue {
    pub value: f64,
    pub unit: HeightUnit,
    pub feet: Option<u32>,
    pub inches: Option<f64>,
}

impl HeightValue {
    pub fn new(value: f64, unit: HeightUnit) -> Self {
        HeightValue {
            value,
            unit,
            feet: None,
            inches: None,
        }
    }
}

/// Display unit preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Metric,
    Imperial,
}

impl Default for Units {
    fn default() -> Self {
        Units::Imperial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_sex_parsing() {
        assert_eq!(Sex::from_str("male").unwrap(), Sex::Male);
        assert_eq!(Sex::from_str("F").unwrap(), Sex::Female);
        assert!(Sex::from_str("other").is_err());
    }

    #[test]
    fn test_activity_level_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::Light.multiplier(), 1.375);
        assert_eq!(ActivityLevel::Moderate.multiplier(), 1.55);
        assert_eq!(ActivityLevel::Active.multiplier(), 1.725);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.9);
    }

    #[test]
    fn test_activity_level_parsing() {
        assert_eq!(
            ActivityLevel::from_str("very_active").unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            ActivityLevel::from_str("Moderate").unwrap(),
            ActivityLevel::Moderate
        );
        assert!(ActivityLevel::from_str("couch").is_err());
    }

    #[test]
    fn test_goal_type_parsing() {
        assert_eq!(GoalType::from_str("lose").unwrap(), GoalType::LoseWeight);
        assert_eq!(
            GoalType::from_str("maintain_weight").unwrap(),
            GoalType::MaintainWeight
        );
        assert!(GoalType::from_str("bulk?").is_err());
    }

    #[test]
    fn test_daily_tracking_new() {
        let day = DailyTracking::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            2000.0,
            1850.0,
        );

        assert_eq!(day.remaining_calories, 150.0);
        assert_eq!(day.deviation(), -150.0);
        assert!(!day.is_adjusted);
        assert!(day.original_target.is_none());
    }

    #[test]
    fn test_height_unit_parsing() {
        assert_eq!(HeightUnit::from_str("in").unwrap(), HeightUnit::Inches);
        assert_eq!(HeightUnit::from_str("cm").unwrap(), HeightUnit::Centimeters);
        assert_eq!(HeightUnit::from_str("ft").unwrap(), HeightUnit::FeetInches);
        assert!(HeightUnit::from_str("furlong").is_err());
    }

    #[test]
    fn test_profile_serialization() {
        let profile = UserProfile {
            age_years: 30,
            sex: Sex::Female,
            height_in: 65.0,
            weight_lbs: 140.0,
            activity_level: ActivityLevel::Moderate,
        };

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"sex\":\"Female\""));
        assert!(json.contains("\"activity_level\":\"Moderate\""));

        let deserialized: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, profile);
    }

    #[test]
    fn test_goal_serialization() {
        let goal = FitnessGoal {
            goal_type: GoalType::LoseWeight,
            target_weight_lbs: 150.0,
            weekly_goal_lbs: 1.0,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            target_date: Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        };

        let json = serde_json::to_string(&goal).unwrap();
        assert!(json.contains("\"goal_type\":\"LoseWeight\""));

        let deserialized: FitnessGoal = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, goal);
    }

    #[test]
    fn test_units_default() {
        assert_eq!(Units::default(), Units::Imperial);
    }
}
