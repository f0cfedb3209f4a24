//! Application configuration.
//!
//! Centralized constants for the dashboard frontend.

/// Backend API base URL.
///
/// The regtrack server started with `regtrack serve`.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Application name shown in the header.
pub const APP_NAME: &str = "Regtrack";

/// Maximum makers selectable in comparison mode.
///
/// The backend truncates longer selections to the same limit.
pub const MAX_COMPARISON_MAKERS: usize = 5;

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Chart height in pixels (single mode).
pub const CHART_HEIGHT: u32 = 420;

/// Chart height in pixels (comparison columns).
pub const COMPARISON_CHART_HEIGHT: u32 = 400;
