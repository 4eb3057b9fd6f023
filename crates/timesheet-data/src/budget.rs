//! Budget progress and status classification.

use timesheet_core::formatting::ratio_percent;
use timesheet_core::models::{BudgetState, BudgetStatus, ProjectStats};

/// Progress (percent) at which a project is flagged as at risk.
pub const AT_RISK_THRESHOLD: f64 = 80.0;

/// Progress (percent) at which a project is over budget.
pub const OVER_BUDGET_THRESHOLD: f64 = 100.0;

/// `spent / budget * 100`; `0` when the budget is absent or not positive.
pub fn budget_progress(spent: f64, budget: Option<f64>) -> f64 {
    ratio_percent(spent, budget.unwrap_or(0.0))
}

/// Thresholds are checked from the top down, so exactly one state applies.
pub fn classify_progress(progress: f64) -> BudgetState {
    if progress >= OVER_BUDGET_THRESHOLD {
        BudgetState::OverBudget
    } else if progress >= AT_RISK_THRESHOLD {
        BudgetState::AtRisk
    } else {
        BudgetState::OnTrack
    }
}

/// Build the budget status of a project from what it has spent.
///
/// A project without a budget is reported with a budget of `0`, progress `0`
/// and `on-track`, however much it has spent.
pub fn budget_status(project_name: &str, spent: f64, budget: Option<f64>) -> BudgetStatus {
    let amount = budget.unwrap_or(0.0);
    let progress = budget_progress(spent, budget);

    BudgetStatus {
        project_id: project_name.to_string(),
        project_name: project_name.to_string(),
        budget: amount,
        spent,
        remaining: (amount - spent).max(0.0),
        progress,
        status: classify_progress(progress),
    }
}

/// Budget status of an accumulated project record.
pub fn classify_project(project: &ProjectStats) -> BudgetStatus {
    budget_status(&project.name, project.cost, project.budget)
}
