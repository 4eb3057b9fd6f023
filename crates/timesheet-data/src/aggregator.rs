//! Aggregation of time entries into a [`TimeTrackingStats`] snapshot.
//!
//! One pass over the entries feeds the project, team and daily groupers;
//! budget statuses are derived from the finished project records.

use timesheet_core::formatting::round_to;
use timesheet_core::models::{TimeEntry, TimeTrackingStats};
use timesheet_core::settings::AggregationConfig;
use tracing::debug;

use crate::budget::classify_project;
use crate::cost::{CostResolver, CostedEntry};
use crate::daily::DailyGrouper;
use crate::projects::ProjectGrouper;
use crate::team::TeamGrouper;

// ── Totals ────────────────────────────────────────────────────────────────────

/// Unrounded global sums, taken over entries rather than over projects.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    hours: f64,
    billable_hours: f64,
    cost: f64,
    billable_cost: f64,
}

impl Totals {
    fn add(&mut self, item: &CostedEntry<'_>) {
        self.hours += item.hours;
        self.cost += item.cost;
        if item.entry.billable {
            self.billable_hours += item.hours;
            self.billable_cost += item.cost;
        }
    }
}

// ── TimeEntryAggregator ───────────────────────────────────────────────────────

/// Turns a complete list of time entries into statistics.
///
/// Holds only configuration; every call to [`aggregate`](Self::aggregate)
/// works on its own accumulators, so one aggregator can serve any number of
/// independent calls.
#[derive(Debug, Clone, Default)]
pub struct TimeEntryAggregator {
    config: AggregationConfig,
}

impl TimeEntryAggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Cost resolver configured with this aggregator's default rate.
    pub fn cost_resolver(&self) -> CostResolver {
        CostResolver::from_config(&self.config)
    }

    /// Build the statistics snapshot for `entries`.
    ///
    /// Never fails: an empty slice yields zero totals and empty lists.
    /// Entries without an attached cost are priced on the way in.
    pub fn aggregate(&self, entries: &[TimeEntry]) -> TimeTrackingStats {
        let resolver = self.cost_resolver();
        let mut totals = Totals::default();
        let mut projects = ProjectGrouper::new();
        let mut team = TeamGrouper::new(self.config.capacity_hours);
        let mut daily = DailyGrouper::new(self.config.timezone, self.config.day_key);

        for entry in entries {
            let item = resolver.costed(entry);
            totals.add(&item);
            projects.add(&item);
            team.add(&item);
            daily.add(&item);
        }

        let project_distribution = projects.finish();
        let budget_status = project_distribution.iter().map(classify_project).collect();
        let team_distribution = team.finish();
        let daily_stats = daily.finish();

        debug!(
            "Aggregated {} entries: {} projects, {} members, {} days",
            entries.len(),
            project_distribution.len(),
            team_distribution.len(),
            daily_stats.len()
        );

        TimeTrackingStats {
            total_hours: round_to(totals.hours, 1),
            billable_hours: round_to(totals.billable_hours, 1),
            total_cost: round_to(totals.cost, 0),
            billable_cost: round_to(totals.billable_cost, 0),
            project_distribution,
            team_distribution,
            daily_stats,
            budget_status,
        }
    }
}

/// Aggregate `entries` with `config`.
pub fn aggregate(entries: &[TimeEntry], config: &AggregationConfig) -> TimeTrackingStats {
    TimeEntryAggregator::new(config.clone()).aggregate(entries)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
