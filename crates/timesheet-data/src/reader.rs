//! Loading of exported time entries.
//!
//! Accepts the service's response body (`{"data": [...]}`) or a bare array of
//! entries, from a single file or every `.json` file under a directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::de::Error as _;
use timesheet_core::error::{Result, StatsError};
use timesheet_core::models::TimeEntry;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse one JSON document into time entries.
pub fn parse_time_entries(json: &str) -> Result<Vec<TimeEntry>> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let entries = match value {
        array @ serde_json::Value::Array(_) => array,
        serde_json::Value::Object(mut map) => map.remove("data").ok_or_else(|| {
            StatsError::JsonParse(serde_json::Error::custom(
                "expected an object with a \"data\" array",
            ))
        })?,
        _ => {
            return Err(StatsError::JsonParse(serde_json::Error::custom(
                "expected a JSON array or an object with a \"data\" array",
            )))
        }
    };

    Ok(serde_json::from_value(entries)?)
}

/// Find all `.json` files recursively under `dir`, sorted by path.
pub fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load time entries from a file, or from every JSON file under a directory.
///
/// A single file must parse. Inside a directory, files that fail to read or
/// parse are skipped with a warning.
pub fn load_time_entries(path: &Path) -> Result<Vec<TimeEntry>> {
    if !path.exists() {
        return Err(StatsError::DataPathNotFound(path.to_path_buf()));
    }

    if !path.is_dir() {
        let entries = read_file(path)?;
        debug!("Loaded {} entries from {}", entries.len(), path.display());
        return Ok(entries);
    }

    let files = find_json_files(path);
    if files.is_empty() {
        return Err(StatsError::NoDataFiles(path.to_path_buf()));
    }

    let mut all_entries = Vec::new();
    for file in &files {
        match read_file(file) {
            Ok(entries) => all_entries.extend(entries),
            Err(e) => warn!("Skipping {}: {}", file.display(), e),
        }
    }

    debug!(
        "Loaded {} entries from {} files",
        all_entries.len(),
        files.len()
    );
    Ok(all_entries)
}

/// Keep entries that started within the last `days_back` days before `now`.
///
/// `None` keeps everything. Entries starting after `now` are dropped along
/// with ones before the window. A window reaching past the earliest
/// representable date keeps every entry up to `now`.
pub fn retain_recent(
    mut entries: Vec<TimeEntry>,
    days_back: Option<u32>,
    now: DateTime<Utc>,
) -> Vec<TimeEntry> {
    let Some(days) = days_back else {
        return entries;
    };

    let cutoff = Duration::try_days(i64::from(days)).and_then(|d| now.checked_sub_signed(d));
    let before = entries.len();
    entries.retain(|e| e.start <= now && cutoff.map_or(true, |c| e.start >= c));

    debug!(
        "Kept {} of {} entries from the last {} days",
        entries.len(),
        before,
        days
    );
    entries
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn read_file(path: &Path) -> Result<Vec<TimeEntry>> {
    let content = std::fs::read_to_string(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_time_entries(&content)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
