//! Per-project accumulation.

use std::collections::HashMap;

use timesheet_core::models::ProjectStats;

use crate::budget::budget_progress;
use crate::cost::CostedEntry;

/// Folds entries into one [`ProjectStats`] per project name.
///
/// Records are created once, on the first entry for a project, and that
/// entry's budget is captured then. Later entries only move the hour and
/// cost accumulators, even if they carry a different budget or none at all.
#[derive(Debug, Default)]
pub struct ProjectGrouper {
    index: HashMap<String, usize>,
    records: Vec<ProjectStats>,
}

impl ProjectGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: &CostedEntry<'_>) {
        let key = item.entry.project_key();
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.records.push(ProjectStats {
                    name: key.to_string(),
                    hours: 0.0,
                    cost: 0.0,
                    budget: item.entry.project().and_then(|p| p.budget),
                    progress: 0.0,
                    billable_hours: 0.0,
                });
                let idx = self.records.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };

        let record = &mut self.records[idx];
        record.hours += item.hours;
        record.cost += item.cost;
        if item.entry.billable {
            record.billable_hours += item.hours;
        }
        record.progress = budget_progress(record.cost, record.budget);
    }

    /// Records in the order their projects were first seen.
    pub fn finish(self) -> Vec<ProjectStats> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostResolver;
    use crate::test_utils::entry;
    use timesheet_core::models::TimeEntry;

    fn group(entries: &[TimeEntry]) -> Vec<ProjectStats> {
        let resolver = CostResolver::default();
        let mut grouper = ProjectGrouper::new();
        for e in entries {
            grouper.add(&resolver.costed(e));
        }
        grouper.finish()
    }

    #[test]
    fn test_groups_by_project_name() {
        let projects = group(&[
            entry("a").project("Website").hours(1.0).build(),
            entry("b").project("Mobile").hours(2.0).build(),
            entry("c").project("Website").hours(3.0).build(),
        ]);
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Website");
        assert_eq!(projects[0].hours, 4.0);
        assert_eq!(projects[0].cost, 600.0);
        assert_eq!(projects[1].name, "Mobile");
        assert_eq!(projects[1].hours, 2.0);
    }

    #[test]
    fn test_unlinked_entries_are_unassigned() {
        let projects = group(&[entry("a").hours(1.0).build()]);
        assert_eq!(projects[0].name, "Unassigned");
        assert_eq!(projects[0].budget, None);
        assert_eq!(projects[0].progress, 0.0);
    }

    #[test]
    fn test_billable_hours_only_from_billable_entries() {
        let projects = group(&[
            entry("a").project("Website").hours(1.0).billable().build(),
            entry("b").project("Website").hours(2.0).build(),
        ]);
        assert_eq!(projects[0].hours, 3.0);
        assert_eq!(projects[0].billable_hours, 1.0);
    }

    #[test]
    fn test_first_seen_budget_wins() {
        let projects = group(&[
            entry("a").project("Website").budget(1_000.0).hours(1.0).build(),
            entry("b").project("Website").budget(9_999.0).hours(1.0).build(),
            entry("c").project("Website").hours(1.0).build(),
        ]);
        assert_eq!(projects[0].budget, Some(1_000.0));
        assert_eq!(projects[0].cost, 450.0);
        assert!((projects[0].progress - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_absent_first_budget_is_never_filled_in() {
        let projects = group(&[
            entry("a").project("Website").hours(1.0).build(),
            entry("b").project("Website").budget(500.0).hours(1.0).build(),
        ]);
        assert_eq!(projects[0].budget, None);
        assert_eq!(projects[0].progress, 0.0);
    }

    #[test]
    fn test_progress_tracks_latest_cost() {
        let projects = group(&[
            entry("a").project("Website").budget(300.0).hours(1.0).build(),
            entry("b").project("Website").hours(1.0).build(),
        ]);
        assert_eq!(projects[0].progress, 100.0);
    }

    #[test]
    fn test_uses_attached_cost() {
        let projects = group(&[entry("a").project("Website").hours(1.0).cost(10.0).build()]);
        assert_eq!(projects[0].cost, 10.0);
    }

    #[test]
    fn test_empty() {
        assert!(group(&[]).is_empty());
    }
}
