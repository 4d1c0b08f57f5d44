use super::ExportError;
use crate::models::DailyTracking;
use crate::tracking::WeeklySummary;
use serde::Serialize;
use std::path::Path;

/// Flattened day record for CSV output
#[derive(Debug, Serialize)]
struct DayRow<'a> {
    date: String,
    target_calories: f64,
    consumed_calories: f64,
    remaining_calories: f64,
    deviation: f64,
    is_adjusted: bool,
    adjustment_reason: &'a str,
}

/// Export day tracking records to CSV
pub fn export_days<P: AsRef<Path>>(
    days: &[DailyTracking],
    output_path: P,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(output_path)?;

    for day in days {
        writer.serialize(DayRow {
            date: day.date.format("%Y-%m-%d").to_string(),
            target_calories: day.target_calories,
            consumed_calories: day.consumed_calories,
            remaining_calories: day.remaining_calories,
            deviation: day.deviation(),
            is_adjusted: day.is_adjusted,
            adjustment_reason: day.adjustment_reason.as_deref().unwrap_or(""),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Flattened weekly summary for CSV output
#[derive(Debug, Serialize)]
struct WeekRow {
    start_date: String,
    end_date: String,
    total_target: f64,
    total_consumed: f64,
    weekly_deviation: f64,
    average_daily_deviation: f64,
    on_track: bool,
}

/// Export weekly summaries to CSV
pub fn export_weekly_summaries<P: AsRef<Path>>(
    summaries: &[WeeklySummary],
    output_path: P,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(output_path)?;

    for summary in summaries {
        writer.serialize(WeekRow {
            start_date: summary.start_date.format("%Y-%m-%d").to_string(),
            end_date: summary.end_date.format("%Y-%m-%d").to_string(),
            total_target: summary.total_target,
            total_consumed: summary.total_consumed,
            weekly_deviation: summary.weekly_deviation,
            average_daily_deviation: summary.average_daily_deviation,
            on_track: summary.on_track,
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn day(d: u32, consumed: f64) -> DailyTracking {
        DailyTracking::new(
            NaiveDate::from_ymd_opt(2025, 3, d).unwrap(),
            2000.0,
            consumed,
        )
    }

    #[test]
    fn test_export_days() {
        let days = vec![day(3, 1900.0), day(4, 2150.0)];

        let temp_file = NamedTempFile::new().unwrap();
        export_days(&days, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.starts_with("date,target_calories,consumed_calories"));
        assert!(content.contains("2025-03-03,2000.0,1900.0,100.0,-100.0,false,"));
        assert!(content.contains("2025-03-04,2000.0,2150.0,-150.0,150.0,false,"));
    }

    #[test]
    fn test_export_adjusted_day_carries_reason() {
        let mut adjusted = day(5, 1800.0);
        adjusted.is_adjusted = true;
        adjusted.adjustment_reason = Some("Lowered target".to_string());

        let temp_file = NamedTempFile::new().unwrap();
        export_days(&[adjusted], temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("true,Lowered target"));
    }

    #[test]
    fn test_export_weekly_summaries() {
        let days: Vec<DailyTracking> = (3..=9).map(|d| day(d, 2000.0)).collect();
        let summary = tracking::weekly_summary(&days).unwrap();

        let temp_file = NamedTempFile::new().unwrap();
        export_weekly_summaries(&[summary], temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.starts_with("start_date,end_date,total_target"));
        assert!(content.contains("2025-03-03,2025-03-09,14000.0,14000.0,0.0,0.0,true"));
    }
}
