//! Builders for time entries used across the unit tests.

use chrono::{DateTime, Utc};
use timesheet_core::models::{EntryUser, ProjectRef, TaskRef, TimeEntry, MS_PER_HOUR};

pub(crate) fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

pub(crate) struct EntryBuilder {
    entry: TimeEntry,
}

/// Unassigned, non-billable, zero-length entry by user 1 on 2024-01-05.
pub(crate) fn entry(id: &str) -> EntryBuilder {
    EntryBuilder {
        entry: TimeEntry {
            id: id.to_string(),
            task: None,
            wid: "w1".to_string(),
            user: EntryUser {
                id: 1,
                username: "ana".to_string(),
                email: String::new(),
            },
            billable: false,
            start: ts("2024-01-05T09:00:00Z"),
            end: None,
            duration: 0,
            description: String::new(),
            tags: Vec::new(),
            source: "clickup".to_string(),
            at: String::new(),
            cost: None,
        },
    }
}

impl EntryBuilder {
    pub(crate) fn user(mut self, id: u64, username: &str) -> Self {
        self.entry.user.id = id;
        self.entry.user.username = username.to_string();
        self
    }

    pub(crate) fn project(mut self, name: &str) -> Self {
        self.entry.task = Some(TaskRef {
            id: format!("task-{}", name),
            name: format!("{} task", name),
            project: Some(ProjectRef {
                id: format!("proj-{}", name),
                name: name.to_string(),
                budget: None,
                hourly_rate: None,
            }),
        });
        self
    }

    pub(crate) fn budget(mut self, budget: f64) -> Self {
        self.project_mut().budget = Some(budget);
        self
    }

    pub(crate) fn rate(mut self, rate: f64) -> Self {
        self.project_mut().hourly_rate = Some(rate);
        self
    }

    pub(crate) fn hours(mut self, hours: f64) -> Self {
        self.entry.duration = (hours * MS_PER_HOUR).round() as i64;
        self
    }

    pub(crate) fn billable(mut self) -> Self {
        self.entry.billable = true;
        self
    }

    pub(crate) fn start(mut self, s: &str) -> Self {
        self.entry.start = ts(s);
        self
    }

    pub(crate) fn cost(mut self, cost: f64) -> Self {
        self.entry.cost = Some(cost);
        self
    }

    pub(crate) fn build(self) -> TimeEntry {
        self.entry
    }

    fn project_mut(&mut self) -> &mut ProjectRef {
        self.entry
            .task
            .as_mut()
            .and_then(|t| t.project.as_mut())
            .expect("call .project() first")
    }
}
