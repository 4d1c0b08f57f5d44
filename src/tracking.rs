//! Daily tracking aggregation and weekly adherence summaries

use crate::error::{CalculationError, Result};
use crate::models::DailyTracking;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Daily deviation beyond which a week is no longer considered on track
pub const ON_TRACK_TOLERANCE_KCAL: f64 = 300.0;

/// Adherence summary over a window of tracked days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// First tracked date in the window
    pub start_date: NaiveDate,

    /// Last tracked date in the window
    pub end_date: NaiveDate,

    /// Sum of daily targets in kcal
    pub total_target: f64,

    /// Sum of logged intake in kcal
    pub total_consumed: f64,

    /// Consumed minus target over the whole window
    pub weekly_deviation: f64,

    /// Mean signed deviation per tracked day
    pub average_daily_deviation: f64,

    /// True when the average daily deviation is within tolerance
    pub on_track: bool,
}

/// Summarize adherence over a window of tracked days
///
/// Days may arrive in any order; the summary spans the earliest to latest
/// date present. Errors when the window is empty.
pub fn weekly_summary(days: &[DailyTracking]) -> Result<WeeklySummary> {
    if days.is_empty() {
        return Err(CalculationError::InsufficientData {
            calculation: "weekly summary".to_string(),
            reason: "no tracked days in window".to_string(),
        }
        .into());
    }

    let total_target: f64 = days.iter().map(|d| d.target_calories).sum();
    let total_consumed: f64 = days.iter().map(|d| d.consumed_calories).sum();
    let weekly_deviation = total_consumed - total_target;
    let average_daily_deviation = weekly_deviation / days.len() as f64;

    let start_date = days.iter().map(|d| d.date).min().unwrap_or(days[0].date);
    let end_date = days.iter().map(|d| d.date).max().unwrap_or(days[0].date);

    Ok(WeeklySummary {
        start_date,
        end_date,
        total_target,
        total_consumed,
        weekly_deviation,
        average_daily_deviation,
        on_track: average_daily_deviation.abs() <= ON_TRACK_TOLERANCE_KCAL,
    })
}

/// Collapse duplicate day records into one entry per date, keeping the
/// latest record for each date (later entries in the slice win)
pub fn dedup_by_date(days: &[DailyTracking]) -> Vec<DailyTracking> {
    let mut by_date: BTreeMap<NaiveDate, DailyTracking> = BTreeMap::new();
    for day in days {
        by_date.insert(day.date, day.clone());
    }
    by_date.into_values().collect()
}
