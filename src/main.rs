use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tabled::{Table, Tabled};

use nutrirs::adjustment::SmartAdjuster;
use nutrirs::config::AppConfig;
use nutrirs::energy::CalorieCalculator;
use nutrirs::export::{DateRange, ExportFormat, ExportManager};
use nutrirs::height;
use nutrirs::logging::{self, LogLevel};
use nutrirs::models::{
    ActivityLevel, DailyTracking, FitnessGoal, GoalType, HeightUnit, Sex, UserProfile,
};
use nutrirs::projection::GoalProjector;
use nutrirs::store::{JsonFileStore, ProfileStore};
use nutrirs::tracking;

/// NutriRS - Nutrition Goal Analysis CLI
///
/// A Rust-based tool for computing calorie targets, tracking intake
/// adherence, and projecting weight goal completion.
#[derive(Parser)]
#[command(name = "nutrirs")]
#[command(author = "NutriRS Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Nutrition Goal Analysis CLI", long_about = None)]
struct Cli {
    /// Sets a custom data directory
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set or show the user profile
    Profile {
        /// Age in years
        #[arg(long)]
        age: Option<u8>,

        /// Biological sex (male, female)
        #[arg(long)]
        sex: Option<String>,

        /// Height input: "5'10" with ft, "70" with in, "178" with cm
        #[arg(long)]
        height: Option<String>,

        /// Unit for the height input (ft, in, cm)
        #[arg(long, default_value = "ft")]
        height_unit: String,

        /// Weight in pounds
        #[arg(long)]
        weight: Option<f64>,

        /// Activity level (sedentary, light, moderate, active, very-active)
        #[arg(long)]
        activity: Option<String>,
    },

    /// Set or show the fitness goal
    Goal {
        /// Goal type (lose, gain, maintain)
        #[arg(long)]
        goal_type: Option<String>,

        /// Target weight in pounds
        #[arg(long)]
        target_weight: Option<f64>,

        /// Planned weekly change in pounds
        #[arg(long, default_value_t = 1.0)]
        weekly: f64,

        /// Optional completion deadline (YYYY-MM-DD)
        #[arg(long)]
        target_date: Option<NaiveDate>,
    },

    /// Compute today's calorie target from profile and goal
    Target,

    /// Log consumed calories for a day
    Log {
        /// Calories consumed
        #[arg(long)]
        consumed: f64,

        /// Date to log (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show a weekly adherence summary
    Summary {
        /// Last date of the window (defaults to today)
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Preview or apply a smart target adjustment
    Adjust {
        /// Window size in days (defaults to configured window)
        #[arg(long)]
        days: Option<usize>,

        /// Persist the adjusted target to today's tracking record
        #[arg(long)]
        apply: bool,
    },

    /// Project goal completion from recent tracking
    Predict {
        /// Current weight in pounds (defaults to profile weight)
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Export tracking data
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (csv, json)
        #[arg(short = 'f', long, default_value = "csv")]
        format: String,

        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (key=value)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,
    },
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Consumed")]
    consumed: String,
    #[tabled(rename = "Deviation")]
    deviation: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default();
    if cli.verbose > 0 {
        config.logging.level = LogLevel::from_verbosity(cli.verbose);
    }
    logging::init_logging(&config.logging)?;

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.settings.data_dir.clone());
    let store = JsonFileStore::open(&data_dir)?;

    match cli.command {
        Commands::Profile {
            age,
            sex,
            height,
            height_unit,
            weight,
            activity,
        } => cmd_profile(&store, age, sex, height, &height_unit, weight, activity)?,

        Commands::Goal {
            goal_type,
            target_weight,
            weekly,
            target_date,
        } => cmd_goal(&store, goal_type, target_weight, weekly, target_date)?,

        Commands::Target => cmd_target(&store)?,

        Commands::Log { consumed, date } => {
            let date = date.unwrap_or_else(today);
            cmd_log(&store, date, consumed)?;
        }

        Commands::Summary { end } => {
            let end = end.unwrap_or_else(today);
            cmd_summary(&store, end)?;
        }

        Commands::Adjust { days, apply } => {
            let window = days.unwrap_or(config.settings.adjustment_window_days);
            cmd_adjust(&store, window, apply)?;
        }

        Commands::Predict { weight } => cmd_predict(&store, weight)?,

        Commands::Export {
            output,
            format,
            from,
            to,
        } => cmd_export(&store, &output, &format, from, to)?,

        Commands::Config { list, set, get } => cmd_config(&mut config, list, set, get)?,
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn load_profile_required(store: &dyn ProfileStore) -> Result<UserProfile> {
    store
        .load_profile()?
        .context("No profile saved yet. Run `nutrirs profile` with --age/--sex/--height/--weight/--activity first.")
}

fn load_goal_required(store: &dyn ProfileStore) -> Result<FitnessGoal> {
    store
        .load_goal()?
        .context("No goal saved yet. Run `nutrirs goal` with --goal-type/--target-weight first.")
}

#[allow(clippy::too_many_arguments)]
fn cmd_profile(
    store: &dyn ProfileStore,
    age: Option<u8>,
    sex: Option<String>,
    height: Option<String>,
    height_unit: &str,
    weight: Option<f64>,
    activity: Option<String>,
) -> Result<()> {
    let setting_fields = age.is_some()
        || sex.is_some()
        || height.is_some()
        || weight.is_some()
        || activity.is_some();

    if setting_fields {
        let age = age.context("--age is required when setting a profile")?;
        let sex = Sex::from_str(&sex.context("--sex is required when setting a profile")?)?;
        let height_text = height.context("--height is required when setting a profile")?;
        let weight_lbs = weight.context("--weight is required when setting a profile")?;
        let activity_level = match activity {
            Some(a) => ActivityLevel::from_str(&a)?,
            None => ActivityLevel::Moderate,
        };

        let unit = HeightUnit::from_str(height_unit)?;
        let parsed = height::parse_height_input(&height_text, unit)
            .with_context(|| format!("Could not read height input: {}", height_text))?;

        if !height::is_valid_height(&parsed) {
            println!(
                "{}",
                "Warning: height is outside the plausible 4-8 ft range".yellow()
            );
        }

        let profile = UserProfile {
            age_years: age,
            sex,
            height_in: height::convert_to_inches(&parsed),
            weight_lbs,
            activity_level,
        };
        store.save_profile(&profile)?;
        println!("{}", "✓ Profile saved".green());
        print_profile(&profile);
    } else {
        let profile = load_profile_required(store)?;
        print_profile(&profile);
    }

    Ok(())
}

fn print_profile(profile: &UserProfile) {
    let height = height::convert_from_inches(profile.height_in, HeightUnit::FeetInches);
    let bmi = CalorieCalculator::calculate_bmi(profile.height_in, profile.weight_lbs);

    println!("{}", "Profile".bold());
    println!(
        "  Age: {}   Sex: {:?}   Height: {}'{:.0}\"   Weight: {} lbs",
        profile.age_years,
        profile.sex,
        height.feet.unwrap_or(0),
        height.inches.unwrap_or(0.0),
        profile.weight_lbs
    );
    println!("  Activity: {}", profile.activity_level.description());
    println!("  BMI: {:.1}", bmi);
}

fn cmd_goal(
    store: &dyn ProfileStore,
    goal_type: Option<String>,
    target_weight: Option<f64>,
    weekly: f64,
    target_date: Option<NaiveDate>,
) -> Result<()> {
    if let (Some(goal_type), Some(target_weight)) = (goal_type, target_weight) {
        let goal = FitnessGoal {
            goal_type: GoalType::from_str(&goal_type)?,
            target_weight_lbs: target_weight,
            weekly_goal_lbs: weekly,
            start_date: today(),
            target_date,
        };
        store.save_goal(&goal)?;
        println!("{}", "✓ Goal saved".green());
        print_goal(&goal);
    } else {
        let goal = load_goal_required(store)?;
        print_goal(&goal);
    }

    Ok(())
}

fn print_goal(goal: &FitnessGoal) {
    println!("{}", "Goal".bold());
    println!(
        "  {:?} to {} lbs at {} lbs/week, started {}",
        goal.goal_type, goal.target_weight_lbs, goal.weekly_goal_lbs, goal.start_date
    );
    if let Some(deadline) = goal.target_date {
        println!("  Deadline: {}", deadline);
    }
}

fn cmd_target(store: &dyn ProfileStore) -> Result<()> {
    let profile = load_profile_required(store)?;
    let goal = load_goal_required(store)?;

    let target = CalorieCalculator::daily_calorie_target(&profile, &goal);

    println!("{}", "Daily calorie target".bold());
    println!("  BMR:   {:.0} kcal", target.bmr);
    println!("  TDEE:  {:.0} kcal", target.tdee);
    println!(
        "  Target: {} kcal",
        format!("{:.0}", target.daily_target).cyan().bold()
    );

    Ok(())
}

fn cmd_log(store: &dyn ProfileStore, date: NaiveDate, consumed: f64) -> Result<()> {
    let profile = load_profile_required(store)?;
    let goal = load_goal_required(store)?;

    // Reuse the day's stored target when one exists, so an applied
    // adjustment is not silently overwritten by a fresh computation
    let target_calories = match store.load_day(date)? {
        Some(existing) => existing.target_calories,
        None => {
            CalorieCalculator::daily_calorie_target(&profile, &goal).daily_target
        }
    };

    let day = DailyTracking::new(date, target_calories, consumed);
    store.save_day(&day)?;

    let status = if day.remaining_calories >= 0.0 {
        format!("{:.0} kcal remaining", day.remaining_calories).green()
    } else {
        format!("{:.0} kcal over target", -day.remaining_calories).yellow()
    };
    println!("✓ Logged {} kcal for {} ({})", consumed, date, status);

    Ok(())
}

fn cmd_summary(store: &dyn ProfileStore, end: NaiveDate) -> Result<()> {
    let days = store.load_recent_days(end, 7)?;
    let summary = tracking::weekly_summary(&days).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let rows: Vec<SummaryRow> = days
        .iter()
        .map(|d| SummaryRow {
            date: d.date.format("%Y-%m-%d").to_string(),
            target: format!("{:.0}", d.target_calories),
            consumed: format!("{:.0}", d.consumed_calories),
            deviation: format!("{:+.0}", d.deviation()),
        })
        .collect();

    println!("{}", Table::new(rows));
    println!(
        "Week {} to {}: {} kcal total deviation, {:.0} kcal/day average",
        summary.start_date,
        summary.end_date,
        format!("{:+.0}", summary.weekly_deviation).bold(),
        summary.average_daily_deviation
    );

    if summary.on_track {
        println!("{}", "✓ On track".green().bold());
    } else {
        println!("{}", "✗ Off track (average deviation above 300 kcal/day)".red().bold());
    }

    Ok(())
}

fn cmd_adjust(store: &dyn ProfileStore, window: usize, apply: bool) -> Result<()> {
    let profile = load_profile_required(store)?;
    let goal = load_goal_required(store)?;

    let current = CalorieCalculator::daily_calorie_target(&profile, &goal);
    let recent = store.load_recent_days(today(), window)?;
    let adjusted = SmartAdjuster::smart_adjustment(&recent, &current, &goal);

    match &adjusted.adjustment_reason {
        Some(reason) => {
            println!(
                "Target {} -> {}",
                format!("{:.0}", current.daily_target).dimmed(),
                format!("{:.0}", adjusted.daily_target).cyan().bold()
            );
            println!("  {}", reason);

            if apply {
                let date = today();
                let mut day = match store.load_day(date)? {
                    Some(existing) => existing,
                    None => DailyTracking::new(date, adjusted.daily_target, 0.0),
                };
                day.original_target = Some(day.target_calories);
                day.target_calories = adjusted.daily_target;
                day.remaining_calories = day.target_calories - day.consumed_calories;
                day.is_adjusted = true;
                day.adjustment_reason = adjusted.adjustment_reason.clone();
                store.save_day(&day)?;
                println!("{}", "✓ Adjustment applied to today's target".green());
            }
        }
        None => {
            println!(
                "No adjustment needed: recent intake is within {:.0} kcal/day of target",
                nutrirs::adjustment::DEAD_BAND_KCAL
            );
        }
    }

    Ok(())
}

fn cmd_predict(store: &dyn ProfileStore, weight: Option<f64>) -> Result<()> {
    let profile = load_profile_required(store)?;
    let goal = load_goal_required(store)?;

    let current_weight = weight.unwrap_or(profile.weight_lbs);
    let recent = store.load_recent_days(today(), 7)?;

    let projection = GoalProjector::predict_goal_completion(
        current_weight,
        goal.target_weight_lbs,
        &recent,
        &goal,
        today(),
    )
    .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("{}", "Goal projection".bold());
    println!(
        "  {} lbs to go at {:.2} lbs/week",
        (goal.target_weight_lbs - current_weight).abs(),
        projection.weekly_rate_lbs
    );
    println!(
        "  Estimated completion: {} ({} days)",
        projection.estimated_date.to_string().cyan().bold(),
        projection.estimated_days
    );

    if projection.on_pace {
        println!("{}", "✓ On pace with the plan".green());
    } else {
        println!("{}", "✗ Off pace (more than 20% from planned rate)".yellow());
    }

    Ok(())
}

fn cmd_export(
    store: &dyn ProfileStore,
    output: &PathBuf,
    format: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let end = to.unwrap_or_else(today);
    // Pull up to a year of history and let the range filter narrow it
    let days = store.load_recent_days(end, 365)?;

    let format = ExportFormat::from_str(format).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let range = DateRange::new(from, to);

    ExportManager::export(
        &days,
        store.load_profile()?.as_ref(),
        store.load_goal()?.as_ref(),
        format,
        &range,
        output,
    )
    .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    println!("{} {}", "✓ Exported to".green(), output.display());
    Ok(())
}

fn cmd_config(
    config: &mut AppConfig,
    list: bool,
    set: Option<String>,
    get: Option<String>,
) -> Result<()> {
    if list {
        println!("{}", "Configuration".bold());
        for key in AppConfig::known_keys() {
            println!(
                "  {} = {}",
                key,
                config.get_value(key).unwrap_or_default()
            );
        }
    } else if let Some(key_value) = set {
        let (key, value) = key_value
            .split_once('=')
            .context("Expected key=value for --set")?;
        config.set_value(key.trim(), value.trim())?;
        config.save_default()?;
        println!("{} {}", "✓ Set".green(), key.trim());
    } else if let Some(key) = get {
        match config.get_value(&key) {
            Some(value) => println!("{}", value),
            None => anyhow::bail!("Unknown configuration key: {}", key),
        }
    }

    Ok(())
}
