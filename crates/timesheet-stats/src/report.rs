//! Plain-text rendering of a statistics snapshot.

use timesheet_core::formatting::{format_currency, format_hours, format_percent};
use timesheet_core::models::TimeTrackingStats;
use timesheet_core::settings::View;

/// Render one report section.
pub fn render(stats: &TimeTrackingStats, view: View) -> String {
    match view {
        View::Overview => render_overview(stats),
        View::Team => render_team(stats),
        View::Projects => render_projects(stats),
        View::Budgets => render_budgets(stats),
        View::Daily => render_daily(stats),
    }
}

/// Render the whole snapshot as pretty JSON with camelCase keys.
pub fn render_json(stats: &TimeTrackingStats) -> serde_json::Result<String> {
    serde_json::to_string_pretty(stats)
}

fn render_overview(stats: &TimeTrackingStats) -> String {
    let rows = [
        format!("  Total hours      {}", format_hours(stats.total_hours)),
        format!("  Billable hours   {}", format_hours(stats.billable_hours)),
        format!("  Total cost       {}", format_currency(stats.total_cost)),
        format!("  Billable amount  {}", format_currency(stats.billable_cost)),
        format!("  Active projects  {}", stats.active_projects()),
        format!("  Team members     {}", stats.team_members()),
    ];
    lines("Overview".to_string(), rows)
}

fn render_team(stats: &TimeTrackingStats) -> String {
    let header = format!(
        "{:<20} {:>10} {:>10} {:>12}  Projects",
        "Member", "Hours", "Capacity", "Utilization"
    );
    let rows = stats.team_distribution.iter().map(|member| {
        format!(
            "{:<20} {:>10} {:>10} {:>12}  {}",
            member.username,
            format_hours(member.hours),
            format_hours(member.capacity),
            format_percent(member.utilization_rate),
            member.projects.join(", ")
        )
    });
    lines(header, rows)
}

fn render_projects(stats: &TimeTrackingStats) -> String {
    let header = format!(
        "{:<24} {:>10} {:>10} {:>12} {:>10}",
        "Project", "Hours", "Billable", "Cost", "Progress"
    );
    let rows = stats.project_distribution.iter().map(|project| {
        format!(
            "{:<24} {:>10} {:>10} {:>12} {:>10}",
            project.name,
            format_hours(project.hours),
            format_hours(project.billable_hours),
            format_currency(project.cost),
            format_percent(project.progress)
        )
    });
    lines(header, rows)
}

fn render_budgets(stats: &TimeTrackingStats) -> String {
    let header = format!(
        "{:<24} {:>12} {:>12} {:>12} {:>10}  Status",
        "Project", "Budget", "Spent", "Remaining", "Progress"
    );
    let rows = stats.budget_status.iter().map(|budget| {
        format!(
            "{:<24} {:>12} {:>12} {:>12} {:>10}  {}",
            budget.project_name,
            format_currency(budget.budget),
            format_currency(budget.spent),
            format_currency(budget.remaining),
            format_percent(budget.progress),
            budget.status.label()
        )
    });
    lines(header, rows)
}

fn render_daily(stats: &TimeTrackingStats) -> String {
    let header = format!(
        "{:<12} {:>10} {:>10} {:>12}",
        "Date", "Hours", "Billable", "Cost"
    );
    let rows = stats.daily_stats.iter().map(|day| {
        format!(
            "{:<12} {:>10} {:>10} {:>12}",
            day.date,
            format_hours(day.hours),
            format_hours(day.billable_hours),
            format_currency(day.cost)
        )
    });
    lines(header, rows)
}

/// Header followed by one row per line, each newline-terminated.
fn lines(header: String, rows: impl IntoIterator<Item = String>) -> String {
    let mut out = header;
    out.push('\n');
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
