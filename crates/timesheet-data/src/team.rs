//! Per-member accumulation and utilization.

use std::collections::HashMap;

use timesheet_core::formatting::ratio_percent;
use timesheet_core::models::TeamStats;

use crate::cost::CostedEntry;

/// Folds entries into one [`TeamStats`] per user id.
#[derive(Debug)]
pub struct TeamGrouper {
    capacity_hours: f64,
    index: HashMap<u64, usize>,
    records: Vec<TeamStats>,
}

impl TeamGrouper {
    pub fn new(capacity_hours: f64) -> Self {
        Self {
            capacity_hours,
            index: HashMap::new(),
            records: Vec::new(),
        }
    }

    pub fn add(&mut self, item: &CostedEntry<'_>) {
        let user = &item.entry.user;
        let idx = match self.index.get(&user.id) {
            Some(&idx) => idx,
            None => {
                self.records.push(TeamStats {
                    user_id: user.id,
                    username: user.username.clone(),
                    hours: 0.0,
                    capacity: self.capacity_hours,
                    utilization_rate: 0.0,
                    projects: Vec::new(),
                });
                let idx = self.records.len() - 1;
                self.index.insert(user.id, idx);
                idx
            }
        };

        let record = &mut self.records[idx];
        record.hours += item.hours;

        // Only linked projects are listed; "Unassigned" time still counts.
        if let Some(name) = item.entry.project_name() {
            if !record.projects.iter().any(|p| p == name) {
                record.projects.push(name.to_string());
            }
        }

        record.utilization_rate = ratio_percent(record.hours, record.capacity);
    }

    /// Records in the order their members were first seen.
    pub fn finish(self) -> Vec<TeamStats> {
        self.records
    }
}
