mod bootstrap;
mod report;

use anyhow::{Context, Result};
use timesheet_core::settings::{OutputFormat, Settings};
use timesheet_data::reader::{load_time_entries, retain_recent};
use timesheet_data::TimeEntryAggregator;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("timesheet-stats v{} starting", env!("CARGO_PKG_VERSION"));

    let config = settings.aggregation_config()?;
    tracing::info!(
        "Rate: {}/h, capacity: {}h, timezone: {}, days: {:?}",
        config.default_hourly_rate,
        config.capacity_hours,
        config.timezone,
        config.day_key
    );

    let input = settings.input_path();
    let entries = load_time_entries(&input)
        .with_context(|| format!("loading time entries from {}", input.display()))?;
    let mut entries = retain_recent(entries, settings.days_back, chrono::Utc::now());
    tracing::info!("Aggregating {} time entries", entries.len());

    let aggregator = TimeEntryAggregator::new(config);
    aggregator.cost_resolver().annotate(&mut entries);
    let stats = aggregator.aggregate(&entries);

    match settings.format {
        OutputFormat::Json => println!("{}", report::render_json(&stats)?),
        OutputFormat::Text => print!("{}", report::render(&stats, settings.view)),
    }

    Ok(())
}
