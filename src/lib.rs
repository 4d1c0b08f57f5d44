// Library interface for NutriRS modules
// This allows integration tests to access the core functionality

pub mod adjustment;
pub mod config;
pub mod energy;
pub mod error;
pub mod export;
pub mod height;
pub mod logging;
pub mod models;
pub mod projection;
pub mod store;
pub mod tracking;

// Re-export commonly used types for convenience
pub use models::*;
pub use adjustment::SmartAdjuster;
pub use energy::CalorieCalculator;
pub use error::{NutriError, Result};
pub use height::{convert_height, is_valid_height, parse_height_input};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use projection::{GoalProjection, GoalProjector};
pub use store::{JsonFileStore, ProfileStore};
pub use tracking::{weekly_summary, WeeklySummary};
