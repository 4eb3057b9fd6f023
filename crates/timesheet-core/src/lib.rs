//! Shared types for timesheet-stats.
//!
//! Holds the time-entry input model, the derived statistics types, engine
//! configuration, the error type and formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{Result, StatsError};
