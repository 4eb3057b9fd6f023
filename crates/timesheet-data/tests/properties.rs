//! Property-based tests for the aggregation engine using proptest

use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use timesheet_data::core::models::{
    BudgetState, EntryUser, ProjectRef, TaskRef, TimeEntry, TimeTrackingStats, MS_PER_HOUR,
};
use timesheet_data::core::settings::AggregationConfig;
use timesheet_data::cost::CostResolver;
use timesheet_data::TimeEntryAggregator;

// Projects keep one budget and rate each so that first-seen capture does not
// depend on input order.
const PROJECTS: &[(&str, Option<f64>, Option<f64>)] = &[
    ("Website", Some(5_000.0), None),
    ("Mobile", Some(800.0), Some(95.0)),
    ("Internal", None, Some(60.0)),
];

prop_compose! {
    fn arb_entry()(
        id in 0u32..1_000_000,
        user in 1u64..5,
        project in prop::option::of(0usize..PROJECTS.len()),
        duration in 0i64..36_000_000,
        billable in any::<bool>(),
        day in 0i64..45,
        minute in 0i64..1_440,
    ) -> TimeEntry {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::days(day)
            + Duration::minutes(minute);
        TimeEntry {
            id: id.to_string(),
            task: project.map(|i| {
                let (name, budget, hourly_rate) = PROJECTS[i];
                TaskRef {
                    id: format!("t{}", i),
                    name: "task".to_string(),
                    project: Some(ProjectRef {
                        id: format!("p{}", i),
                        name: name.to_string(),
                        budget,
                        hourly_rate,
                    }),
                }
            }),
            wid: "w".to_string(),
            user: EntryUser {
                id: user,
                username: format!("user{}", user),
                email: String::new(),
            },
            billable,
            start,
            end: Some(start + Duration::milliseconds(duration)),
            duration,
            description: String::new(),
            tags: Vec::new(),
            source: "clickup".to_string(),
            at: String::new(),
            cost: None,
        }
    }
}

fn arb_entries() -> impl Strategy<Value = Vec<TimeEntry>> {
    prop::collection::vec(arb_entry(), 0..60)
}

fn arb_entries_and_permutation() -> impl Strategy<Value = (Vec<TimeEntry>, Vec<TimeEntry>)> {
    arb_entries().prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle()))
}

fn run(entries: &[TimeEntry]) -> TimeTrackingStats {
    TimeEntryAggregator::new(AggregationConfig::default()).aggregate(entries)
}

fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

proptest! {
    #[test]
    fn prop_totals_match_entry_sums(entries in arb_entries()) {
        let stats = run(&entries);
        let resolver = CostResolver::default();

        let hours: f64 = entries.iter().map(|e| e.duration as f64 / MS_PER_HOUR).sum();
        let cost: f64 = entries.iter().map(|e| resolver.resolve(e)).sum();
        let billable_hours: f64 = entries
            .iter()
            .filter(|e| e.billable)
            .map(|e| e.duration as f64 / MS_PER_HOUR)
            .sum();
        let billable_cost: f64 = entries
            .iter()
            .filter(|e| e.billable)
            .map(|e| resolver.resolve(e))
            .sum();

        prop_assert!(close(stats.total_hours, hours, 0.05 + 1e-9));
        prop_assert!(close(stats.total_cost, cost, 0.5 + 1e-9));
        prop_assert!(close(stats.billable_hours, billable_hours, 0.05 + 1e-9));
        prop_assert!(close(stats.billable_cost, billable_cost, 0.5 + 1e-9));
        prop_assert!(stats.billable_hours <= stats.total_hours);
    }

    #[test]
    fn prop_project_and_team_values_order_independent(
        (entries, shuffled) in arb_entries_and_permutation()
    ) {
        let a = run(&entries);
        let b = run(&shuffled);

        prop_assert_eq!(a.project_distribution.len(), b.project_distribution.len());
        let b_projects: HashMap<&str, _> = b
            .project_distribution
            .iter()
            .map(|p| (p.name.as_str(), p))
            .collect();
        for p in &a.project_distribution {
            let q = b_projects[p.name.as_str()];
            prop_assert!(close(p.hours, q.hours, 1e-6));
            prop_assert!(close(p.cost, q.cost, 1e-6));
            prop_assert!(close(p.billable_hours, q.billable_hours, 1e-6));
            prop_assert!(close(p.progress, q.progress, 1e-6));
            prop_assert_eq!(p.budget, q.budget);
        }

        prop_assert_eq!(a.team_distribution.len(), b.team_distribution.len());
        let b_team: HashMap<u64, _> = b
            .team_distribution
            .iter()
            .map(|m| (m.user_id, m))
            .collect();
        for m in &a.team_distribution {
            let n = b_team[&m.user_id];
            prop_assert!(close(m.hours, n.hours, 1e-6));
            prop_assert!(close(m.utilization_rate, n.utilization_rate, 1e-6));
            let mut mine = m.projects.clone();
            let mut theirs = n.projects.clone();
            mine.sort();
            theirs.sort();
            prop_assert_eq!(mine, theirs);
        }
    }

    #[test]
    fn prop_budget_status_consistent(entries in arb_entries()) {
        let stats = run(&entries);
        prop_assert_eq!(stats.budget_status.len(), stats.project_distribution.len());

        for (status, project) in stats.budget_status.iter().zip(&stats.project_distribution) {
            prop_assert_eq!(&status.project_name, &project.name);
            prop_assert!(status.remaining >= 0.0);
            let expected = if status.progress >= 100.0 {
                BudgetState::OverBudget
            } else if status.progress >= 80.0 {
                BudgetState::AtRisk
            } else {
                BudgetState::OnTrack
            };
            prop_assert_eq!(status.status, expected);
            if project.budget.is_none() {
                prop_assert_eq!(status.progress, 0.0);
                prop_assert_eq!(status.status, BudgetState::OnTrack);
            }
        }
    }

    #[test]
    fn prop_projects_and_members_are_distinct(entries in arb_entries()) {
        let stats = run(&entries);

        let mut names: Vec<&str> = stats.project_distribution.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), stats.project_distribution.len());

        for member in &stats.team_distribution {
            prop_assert_eq!(member.capacity, 160.0);
            let mut projects = member.projects.clone();
            projects.sort();
            projects.dedup();
            prop_assert_eq!(projects.len(), member.projects.len());
        }
    }
}
