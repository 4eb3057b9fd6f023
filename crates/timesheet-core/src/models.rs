use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time_utils::{flexible_timestamp, optional_timestamp};

/// Milliseconds in one hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Project key used when an entry is not linked to any project.
pub const UNASSIGNED_PROJECT: &str = "Unassigned";

// ── Input records ─────────────────────────────────────────────────────────────

/// Project a task belongs to, as embedded in a time entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Allocated budget in currency units.
    #[serde(default)]
    pub budget: Option<f64>,
    /// Rate overriding the default hourly rate for this project's entries.
    #[serde(default)]
    pub hourly_rate: Option<f64>,
}

/// Task a time entry was logged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project: Option<ProjectRef>,
}

/// Workspace member who logged a time entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryUser {
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// A single time-tracking record fetched from the project-management service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    #[serde(default)]
    pub task: Option<TaskRef>,
    /// Workspace identifier.
    #[serde(default)]
    pub wid: String,
    pub user: EntryUser,
    #[serde(default)]
    pub billable: bool,
    #[serde(with = "flexible_timestamp")]
    pub start: DateTime<Utc>,
    /// Absent while a timer is still running.
    #[serde(default, with = "optional_timestamp")]
    pub end: Option<DateTime<Utc>>,
    /// Logged duration in milliseconds.
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub duration: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub at: String,
    /// Resolved monetary cost; `None` until costs have been annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl TimeEntry {
    /// Project the entry's task is linked to, if any.
    pub fn project(&self) -> Option<&ProjectRef> {
        self.task.as_ref().and_then(|t| t.project.as_ref())
    }

    /// Name of the linked project, if any.
    pub fn project_name(&self) -> Option<&str> {
        self.project()
            .map(|p| p.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Key the entry is grouped under in per-project views.
    pub fn project_key(&self) -> &str {
        self.project_name().unwrap_or(UNASSIGNED_PROJECT)
    }

    /// Logged duration in hours.
    ///
    /// Running timers report a negative duration; those count as zero.
    pub fn hours(&self) -> f64 {
        self.duration.max(0) as f64 / MS_PER_HOUR
    }
}

/// Durations arrive as integers, floats or numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Int(i64),
    Float(f64),
    Text(String),
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawDuration>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawDuration::Int(ms)) => Ok(ms),
        Some(RawDuration::Float(ms)) => Ok(ms.round() as i64),
        Some(RawDuration::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed
                .parse::<i64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid duration \"{}\"", text)))
        }
    }
}

// ── Derived statistics ────────────────────────────────────────────────────────

/// Accumulated totals for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub name: String,
    pub hours: f64,
    pub cost: f64,
    /// Budget captured from the first entry seen for this project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// `cost / budget * 100`, or `0` without a positive budget.
    pub progress: f64,
    pub billable_hours: f64,
}

/// Accumulated hours and utilization for one team member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub user_id: u64,
    pub username: String,
    pub hours: f64,
    /// Hours available to the member over the reporting period.
    pub capacity: f64,
    /// `hours / capacity * 100`.
    pub utilization_rate: f64,
    /// Distinct project names in the order the member first logged them.
    pub projects: Vec<String>,
}

/// Totals for one day label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub hours: f64,
    pub billable_hours: f64,
    pub cost: f64,
}

/// Budget classification of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetState {
    OnTrack,
    AtRisk,
    OverBudget,
}

impl BudgetState {
    /// Upper-case badge text, e.g. `"AT RISK"`.
    pub fn label(&self) -> &'static str {
        match self {
            BudgetState::OnTrack => "ON TRACK",
            BudgetState::AtRisk => "AT RISK",
            BudgetState::OverBudget => "OVER BUDGET",
        }
    }
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BudgetState::OnTrack => "on-track",
            BudgetState::AtRisk => "at-risk",
            BudgetState::OverBudget => "over-budget",
        };
        f.write_str(s)
    }
}

/// Spend against budget for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    /// The project name doubles as its identifier.
    pub project_id: String,
    pub project_name: String,
    /// `0` when the project has no budget.
    pub budget: f64,
    pub spent: f64,
    /// Never negative.
    pub remaining: f64,
    pub progress: f64,
    pub status: BudgetState,
}

/// Snapshot produced by one aggregation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackingStats {
    /// Rounded to one decimal.
    pub total_hours: f64,
    /// Rounded to one decimal.
    pub billable_hours: f64,
    /// Rounded to the nearest unit.
    pub total_cost: f64,
    /// Rounded to the nearest unit.
    pub billable_cost: f64,
    pub project_distribution: Vec<ProjectStats>,
    pub team_distribution: Vec<TeamStats>,
    pub daily_stats: Vec<DailyStats>,
    pub budget_status: Vec<BudgetStatus>,
}

impl TimeTrackingStats {
    /// Number of distinct projects, `"Unassigned"` included.
    pub fn active_projects(&self) -> usize {
        self.project_distribution.len()
    }

    /// Number of distinct team members.
    pub fn team_members(&self) -> usize {
        self.team_distribution.len()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
