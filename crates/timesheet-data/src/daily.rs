//! Per-day accumulation.

use std::collections::HashMap;

use chrono_tz::Tz;
use timesheet_core::formatting::round_to;
use timesheet_core::models::DailyStats;
use timesheet_core::time_utils::{day_label, DayKey};

use crate::cost::CostedEntry;

/// Folds entries into one [`DailyStats`] per day label.
///
/// With [`DayKey::MonthDay`] the label carries no year, so entries from the
/// same month and day of different years land in one bucket.
#[derive(Debug)]
pub struct DailyGrouper {
    timezone: Tz,
    day_key: DayKey,
    index: HashMap<String, usize>,
    records: Vec<DailyStats>,
}

impl DailyGrouper {
    pub fn new(timezone: Tz, day_key: DayKey) -> Self {
        Self {
            timezone,
            day_key,
            index: HashMap::new(),
            records: Vec::new(),
        }
    }

    pub fn add(&mut self, item: &CostedEntry<'_>) {
        let label = day_label(item.entry.start, self.timezone, self.day_key);
        let idx = match self.index.get(&label) {
            Some(&idx) => idx,
            None => {
                self.records.push(DailyStats {
                    date: label.clone(),
                    hours: 0.0,
                    billable_hours: 0.0,
                    cost: 0.0,
                });
                let idx = self.records.len() - 1;
                self.index.insert(label, idx);
                idx
            }
        };

        let record = &mut self.records[idx];
        record.hours += item.hours;
        record.cost += item.cost;
        if item.entry.billable {
            record.billable_hours += item.hours;
        }
    }

    /// Records in first-occurrence order, hours rounded to one decimal and
    /// cost to whole units.
    pub fn finish(self) -> Vec<DailyStats> {
        self.records
            .into_iter()
            .map(|day| DailyStats {
                date: day.date,
                hours: round_to(day.hours, 1),
                billable_hours: round_to(day.billable_hours, 1),
                cost: round_to(day.cost, 0),
            })
            .collect()
    }
}
