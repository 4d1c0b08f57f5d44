//! Height unit conversion and input parsing
//!
//! Inches are the canonical intermediate unit; every conversion goes through
//! them. Conversion is total: an unrecognized decomposition falls through to
//! the raw value rather than failing. Parsing is the only rejecting surface,
//! returning `None` for non-positive or unreadable input.

use crate::models::{HeightUnit, HeightValue};
use regex::Regex;
use std::sync::OnceLock;

const CM_PER_INCH: f64 = 2.54;
const INCHES_PER_FOOT: f64 = 12.0;

/// Plausibility bounds for an adult height, in inches (4-8 ft)
const MIN_PLAUSIBLE_IN: f64 = 48.0;
const MAX_PLAUSIBLE_IN: f64 = 96.0;

fn feet_inches_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Accepts 5'10, 5' 10", 5 10, 5ft 10in, 5feet10inches, or a bare 5
        Regex::new(r#"^\s*(\d+)\s*(?:'|ft|feet)?\s*(?:(\d+(?:\.\d+)?)\s*(?:"|in|inches)?)?\s*$"#)
            .expect("hardcoded pattern")
    })
}

/// Convert any height value to inches
pub fn convert_to_inches(height: &HeightValue) -> f64 {
    match height.unit {
        HeightUnit::Inches => height.value,
        HeightUnit::Centimeters => height.value / CM_PER_INCH,
        HeightUnit::FeetInches => match (height.feet, height.inches) {
            (Some(feet), Some(inches)) => feet as f64 * INCHES_PER_FOOT + inches,
            (Some(feet), None) => feet as f64 * INCHES_PER_FOOT,
            // No decomposition: the value already carries total inches
            _ => height.value,
        },
    }
}

/// Convert a measurement in inches to the requested unit
pub fn convert_from_inches(inches: f64, unit: HeightUnit) -> HeightValue {
    match unit {
        HeightUnit::Inches => HeightValue::new(inches, HeightUnit::Inches),
        HeightUnit::Centimeters => {
            HeightValue::new(inches * CM_PER_INCH, HeightUnit::Centimeters)
        }
        HeightUnit::FeetInches => {
            let feet = (inches / INCHES_PER_FOOT).floor();
            let remainder = inches - feet * INCHES_PER_FOOT;
            HeightValue {
                value: inches,
                unit: HeightUnit::FeetInches,
                feet: Some(feet as u32),
                inches: Some(remainder),
            }
        }
    }
}

/// Convert a height value to another unit via the canonical inches form
pub fn convert_height(height: &HeightValue, target_unit: HeightUnit) -> HeightValue {
    convert_from_inches(convert_to_inches(height), target_unit)
}

/// Parse free-form height input in the given unit
///
/// Feet/inches input accepts `5'10`, `5 10`, `5ft 10in` and a bare feet
/// count. Inches and centimeters accept plain numbers. Returns `None` for
/// non-positive or unparseable input.
pub fn parse_height_input(text: &str, unit: HeightUnit) -> Option<HeightValue> {
    match unit {
        HeightUnit::FeetInches => {
            let caps = feet_inches_pattern().captures(text.trim())?;
            let feet: u32 = caps.get(1)?.as_str().parse().ok()?;
            let inches: f64 = caps
                .get(2)
                .map(|m| m.as_str().parse().ok())
                .unwrap_or(Some(0.0))?;

            let total = feet as f64 * INCHES_PER_FOOT + inches;
            if total <= 0.0 {
                return None;
            }

            Some(HeightValue {
                value: total,
                unit: HeightUnit::FeetInches,
                feet: Some(feet),
                inches: Some(inches),
            })
        }
        HeightUnit::Inches | HeightUnit::Centimeters => {
            let value: f64 = text.trim().parse().ok()?;
            if value <= 0.0 {
                return None;
            }
            Some(HeightValue::new(value, unit))
        }
    }
}

/// Check a height against adult plausibility bounds (4-8 ft)
pub fn is_valid_height(height: &HeightValue) -> bool {
    let inches = convert_to_inches(height);
    (MIN_PLAUSIBLE_IN..=MAX_PLAUSIBLE_IN).contains(&inches)
}
