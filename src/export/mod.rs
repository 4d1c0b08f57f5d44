use crate::models::{DailyTracking, FitnessGoal, UserProfile};
use crate::tracking::{self, WeeklySummary};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub mod csv;
pub mod json;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Date range filter for exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    /// Check if a date falls within this range
    pub fn contains(&self, date: &NaiveDate) -> bool {
        let after_start = self.start.map_or(true, |start| date >= &start);
        let before_end = self.end.map_or(true, |end| date <= &end);
        after_start && before_end
    }

    /// Filter day records by date range
    pub fn filter_days<'a>(&self, days: &'a [DailyTracking]) -> Vec<&'a DailyTracking> {
        days.iter().filter(|d| self.contains(&d.date)).collect()
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] ::csv::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

/// Full tracking report for JSON export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub profile: Option<UserProfile>,
    pub goal: Option<FitnessGoal>,
    pub date_range: DateRange,
    pub days: Vec<DailyTracking>,
    pub weekly_summaries: Vec<WeeklySummary>,
}

/// Main export entry point
pub struct ExportManager;

impl ExportManager {
    /// Export tracked days, grouped week summaries, and context records
    pub fn export<P: AsRef<Path>>(
        days: &[DailyTracking],
        profile: Option<&UserProfile>,
        goal: Option<&FitnessGoal>,
        format: ExportFormat,
        date_range: &DateRange,
        output_path: P,
    ) -> Result<(), ExportError> {
        let filtered: Vec<DailyTracking> = date_range
            .filter_days(days)
            .into_iter()
            .cloned()
            .collect();

        if filtered.is_empty() {
            return Err(ExportError::InsufficientData(
                "no tracked days in the requested range".to_string(),
            ));
        }

        match format {
            ExportFormat::Csv => csv::export_days(&filtered, output_path),
            ExportFormat::Json => {
                let report = Self::build_report(&filtered, profile, goal, date_range);
                json::export_report(&report, output_path)
            }
        }
    }

    fn build_report(
        days: &[DailyTracking],
        profile: Option<&UserProfile>,
        goal: Option<&FitnessGoal>,
        date_range: &DateRange,
    ) -> TrackingReport {
        let weekly_summaries = Self::summarize_by_week(days);

        TrackingReport {
            generated_at: chrono::Utc::now(),
            profile: profile.cloned(),
            goal: goal.cloned(),
            date_range: date_range.clone(),
            days: days.to_vec(),
            weekly_summaries,
        }
    }

    /// Group day records into ISO weeks and summarize each
    pub fn summarize_by_week(days: &[DailyTracking]) -> Vec<WeeklySummary> {
        use chrono::Datelike;
        use std::collections::BTreeMap;

        let mut weeks: BTreeMap<(i32, u32), Vec<DailyTracking>> = BTreeMap::new();
        for day in days {
            let iso = day.date.iso_week();
            weeks
                .entry((iso.year(), iso.week()))
                .or_default()
                .push(day.clone());
        }

        weeks
            .into_values()
            .filter_map(|week_days| tracking::weekly_summary(&week_days).ok())
            .collect()
    }
}
