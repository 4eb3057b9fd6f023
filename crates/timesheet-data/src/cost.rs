//! Per-entry cost resolution.

use timesheet_core::models::TimeEntry;
use timesheet_core::settings::AggregationConfig;

/// An entry paired with the hours and cost every grouping pass folds in.
#[derive(Debug, Clone, Copy)]
pub struct CostedEntry<'a> {
    pub entry: &'a TimeEntry,
    pub hours: f64,
    pub cost: f64,
}

/// Prices entries at their project's hourly rate, or a default rate.
#[derive(Debug, Clone, Copy)]
pub struct CostResolver {
    default_hourly_rate: f64,
}

impl CostResolver {
    pub fn new(default_hourly_rate: f64) -> Self {
        Self {
            default_hourly_rate,
        }
    }

    pub fn from_config(config: &AggregationConfig) -> Self {
        Self::new(config.default_hourly_rate)
    }

    /// The project's rate unless it is absent, zero or NaN.
    pub fn rate_for(&self, entry: &TimeEntry) -> f64 {
        entry
            .project()
            .and_then(|p| p.hourly_rate)
            .filter(|rate| *rate != 0.0 && !rate.is_nan())
            .unwrap_or(self.default_hourly_rate)
    }

    /// `hours * rate`. Zero-length entries cost nothing.
    pub fn resolve(&self, entry: &TimeEntry) -> f64 {
        entry.hours() * self.rate_for(entry)
    }

    /// Attach a resolved cost to every entry, replacing any previous value.
    pub fn annotate(&self, entries: &mut [TimeEntry]) {
        for entry in entries.iter_mut() {
            entry.cost = Some(self.resolve(entry));
        }
    }

    /// Pair `entry` with its hours and cost.
    ///
    /// An already attached cost is used as is; otherwise the cost is resolved
    /// here.
    pub fn costed<'a>(&self, entry: &'a TimeEntry) -> CostedEntry<'a> {
        CostedEntry {
            entry,
            hours: entry.hours(),
            cost: entry.cost.unwrap_or_else(|| self.resolve(entry)),
        }
    }
}

impl Default for CostResolver {
    fn default() -> Self {
        Self::from_config(&AggregationConfig::default())
    }
}
