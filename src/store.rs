//! Persistence abstraction for profiles, goals, and day tracking
//!
//! The calculation engine never touches storage; callers load records
//! through a `ProfileStore` and pass plain values in. The file-backed
//! implementation keeps one JSON document per record under a data
//! directory, day records keyed by ISO date.

use crate::error::{NutriError, Result, StorageError};
use crate::models::{DailyTracking, FitnessGoal, UserProfile};
use chrono::{Duration, NaiveDate};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROFILE_FILE: &str = "profile.json";
const GOAL_FILE: &str = "goal.json";
const DAYS_DIR: &str = "days";

/// Storage interface consumed by the CLI and export layers
pub trait ProfileStore {
    fn save_profile(&self, profile: &UserProfile) -> Result<()>;
    fn load_profile(&self) -> Result<Option<UserProfile>>;

    fn save_goal(&self, goal: &FitnessGoal) -> Result<()>;
    fn load_goal(&self) -> Result<Option<FitnessGoal>>;

    fn save_day(&self, day: &DailyTracking) -> Result<()>;
    fn load_day(&self, date: NaiveDate) -> Result<Option<DailyTracking>>;

    /// Load up to `count` day records ending at `end_date`, oldest first.
    /// Missing days are skipped rather than reported.
    fn load_recent_days(&self, end_date: NaiveDate, count: usize) -> Result<Vec<DailyTracking>>;
}

/// File-backed store keeping one JSON document per record
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at the given data directory, creating it on
    /// first use
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(DAYS_DIR))?;
        Ok(JsonFileStore { root })
    }

    fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(DAYS_DIR)
            .join(format!("{}.json", date.format("%Y-%m-%d")))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(|e| {
            NutriError::Internal(format!("serialization failed: {}", e))
        })?;

        fs::write(path, json).map_err(|e| StorageError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "record written");
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        let value = serde_json::from_str(&contents).map_err(|e| StorageError::Corrupted {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Some(value))
    }
}

impl ProfileStore for JsonFileStore {
    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.write_json(&self.root.join(PROFILE_FILE), profile)
    }

    fn load_profile(&self) -> Result<Option<UserProfile>> {
        self.read_json(&self.root.join(PROFILE_FILE))
    }

    fn save_goal(&self, goal: &FitnessGoal) -> Result<()> {
        self.write_json(&self.root.join(GOAL_FILE), goal)
    }

    fn load_goal(&self) -> Result<Option<FitnessGoal>> {
        self.read_json(&self.root.join(GOAL_FILE))
    }

    fn save_day(&self, day: &DailyTracking) -> Result<()> {
        self.write_json(&self.day_path(day.date), day)
    }

    fn load_day(&self, date: NaiveDate) -> Result<Option<DailyTracking>> {
        self.read_json(&self.day_path(date))
    }

    fn load_recent_days(&self, end_date: NaiveDate, count: usize) -> Result<Vec<DailyTracking>> {
        let mut days = Vec::new();
        for offset in 0..count as i64 {
            let date = end_date - Duration::days(offset);
            if let Some(day) = self.load_day(date)? {
                days.push(day);
            }
        }
        days.reverse();
        Ok(days)
    }
}
