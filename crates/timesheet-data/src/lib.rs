//! Aggregation engine and input loading for timesheet-stats.
//!
//! Prices time entries, groups them by project, team member and day,
//! classifies project budgets, and loads exported entries from disk.

pub mod aggregator;
pub mod budget;
pub mod cost;
pub mod daily;
pub mod projects;
pub mod reader;
pub mod team;

#[cfg(test)]
mod test_utils;

pub use aggregator::{aggregate, TimeEntryAggregator};
pub use timesheet_core as core;
