use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{Result, StatsError};
use crate::time_utils::{resolve_timezone, DayKey};

/// Hours in one working day.
pub const WORK_HOURS_PER_DAY: f64 = 8.0;

/// Working days in one reporting period.
pub const WORKING_DAYS_PER_PERIOD: f64 = 20.0;

/// Rate applied to entries whose project carries no hourly rate.
pub const DEFAULT_HOURLY_RATE: f64 = 150.0;

// ── AggregationConfig ──────────────────────────────────────────────────────────

/// Parameters of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationConfig {
    /// Currency units per hour when the project rate is absent, zero or NaN.
    pub default_hourly_rate: f64,
    /// Hours each team member can log per period. Utilization is measured
    /// against it.
    pub capacity_hours: f64,
    /// Day bucketing for the daily breakdown.
    pub day_key: DayKey,
    /// Zone start timestamps are converted into before labelling days.
    pub timezone: Tz,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            default_hourly_rate: DEFAULT_HOURLY_RATE,
            capacity_hours: WORK_HOURS_PER_DAY * WORKING_DAYS_PER_PERIOD,
            day_key: DayKey::MonthDay,
            timezone: Tz::UTC,
        }
    }
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Report section to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Overview,
    Team,
    Projects,
    Budgets,
    Daily,
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Time-tracking statistics for exported ClickUp time entries
#[derive(Parser, Debug, Clone)]
#[command(
    name = "timesheet-stats",
    about = "Time-tracking statistics for exported ClickUp time entries",
    version
)]
pub struct Settings {
    /// Time entries export: a JSON file or a directory of JSON files
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Report section
    #[arg(long, value_enum, default_value = "overview")]
    pub view: View,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Hourly rate for projects without one
    #[arg(long, default_value_t = DEFAULT_HOURLY_RATE)]
    pub default_rate: f64,

    /// Working hours per day used for team capacity
    #[arg(long, default_value_t = WORK_HOURS_PER_DAY)]
    pub hours_per_day: f64,

    /// Working days per period used for team capacity
    #[arg(long, default_value_t = WORKING_DAYS_PER_PERIOD)]
    pub working_days: f64,

    /// Timezone for daily buckets ("auto" detects the system timezone)
    #[arg(long, default_value = "UTC")]
    pub timezone: String,

    /// Include the year in daily bucket labels
    #[arg(long)]
    pub year_aware_days: bool,

    /// Only keep entries started within the last N days
    #[arg(long)]
    pub days_back: Option<u32>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Build the engine configuration from the CLI values.
    pub fn aggregation_config(&self) -> Result<AggregationConfig> {
        if !self.default_rate.is_finite() || self.default_rate < 0.0 {
            return Err(StatsError::Config(format!(
                "default rate must be a non-negative number, got {}",
                self.default_rate
            )));
        }

        let capacity_hours = self.hours_per_day * self.working_days;
        if !capacity_hours.is_finite() || capacity_hours <= 0.0 {
            return Err(StatsError::Config(format!(
                "capacity must be positive, got {} hours/day x {} days",
                self.hours_per_day, self.working_days
            )));
        }

        Ok(AggregationConfig {
            default_hourly_rate: self.default_rate,
            capacity_hours,
            day_key: if self.year_aware_days {
                DayKey::Calendar
            } else {
                DayKey::MonthDay
            },
            timezone: resolve_timezone(&self.timezone)?,
        })
    }

    /// Input path, defaulting to `~/.timesheet-stats/time_entries.json`.
    pub fn input_path(&self) -> PathBuf {
        self.input.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".timesheet-stats")
                .join("time_entries.json")
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
