//! Common types used across the frontend application.
//!
//! API types mirror the JSON produced by the regtrack backend.
//!
//! # Categories
//!
//! - **Filter Types** - Sidebar choices and queries
//! - **Chart Types** - Panels returned by the view endpoints
//! - **View Types** - Single and comparison views
//! - **Log Types** - Real-time log streaming
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Filter Types
// =============================================================================

/// Dashboard mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardMode {
    /// Single manufacturer detail
    Single,
    /// Up to five manufacturers side by side
    Comparison,
}

impl DashboardMode {
    /// Label of the sidebar radio button.
    pub fn label(&self) -> &'static str {
        match self {
            DashboardMode::Single => "Single Manufacturer",
            DashboardMode::Comparison => "Manufacturer Comparison",
        }
    }

    /// Label of the trigger button.
    pub fn action(&self) -> &'static str {
        match self {
            DashboardMode::Single => "Search",
            DashboardMode::Comparison => "Show Comparison",
        }
    }

    /// Notice displayed before the first trigger.
    pub fn prompt(&self) -> &'static str {
        match self {
            DashboardMode::Single => "Please select filters and click Search to view data and graphs.",
            DashboardMode::Comparison => {
                "Please select filters and click Show Comparison to view the comparative charts."
            }
        }
    }
}

/// Sidebar choices for one category (`GET /api/options`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub category: Option<String>,
    pub makers: Vec<String>,
    pub default_maker: Option<String>,
    pub years: Vec<i32>,
    pub default_comparison: Vec<String>,
    pub max_comparison: usize,
}

/// Body of `POST /api/views/single`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleQuery {
    pub category: String,
    pub maker: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub include_raw: bool,
}

/// Body of `POST /api/views/comparison`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonQuery {
    pub category: String,
    pub makers: Vec<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

/// Filter actually applied by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFilter {
    pub category: String,
    pub makers: Vec<String>,
    pub year_from: i32,
    pub year_to: i32,
}

// =============================================================================
// Chart Types
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// One point: YearQuarter key and value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: Option<f64>,
}

/// Data for one chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    pub metric: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
    pub summary: Option<String>,
    #[serde(default)]
    pub diverging: bool,
}

/// A chart, or the warning shown instead of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartPanel {
    Chart(ChartSeries),
    Warning { message: String },
}

// =============================================================================
// View Types
// =============================================================================

/// One master table row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyRow {
    #[serde(rename = "Vehicle_Category")]
    pub vehicle_category: String,
    #[serde(rename = "Maker")]
    pub maker: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Quarter")]
    pub quarter: String,
    #[serde(rename = "Registrations")]
    pub registrations: Option<f64>,
    #[serde(rename = "YearQuarter")]
    pub year_quarter: String,
    #[serde(rename = "QoQ_Growth")]
    pub qoq_growth: Option<f64>,
    #[serde(rename = "YoY_Growth")]
    pub yoy_growth: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleView {
    pub caption: String,
    pub panels: Vec<ChartPanel>,
    pub rows: Option<Vec<QuarterlyRow>>,
    pub row_count: usize,
    pub filter: RowFilter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MakerPanels {
    pub maker: String,
    pub panels: Vec<ChartPanel>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    pub caption: String,
    pub notices: Vec<Notice>,
    pub makers: Vec<MakerPanels>,
    pub filter: RowFilter,
}

/// Envelope of every view response.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse<T> {
    pub request_id: String,
    /// "ready" or "warning"
    pub status: String,
    pub mode: DashboardMode,
    pub view: T,
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
///
/// Matches the backend's log levels for SSE streaming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }

    /// Get emoji prefix for display.
    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Info => "ℹ️",
            LogLevel::Success => "✅",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }
}

/// A single log entry from the backend.
///
/// Received via SSE from `/api/logs` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub indent: u8,
    /// RFC 3339 on the wire, replaced by HH:MM:SS on receipt
    #[serde(default)]
    pub timestamp: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// Request could not be sent or the connection failed.
    Network(String),
    /// Backend answered with an error status.
    Server { status: u16, message: String },
    /// Response body did not match the expected shape.
    Decode(String),
    /// Plotly call failed.
    Chart(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server { status, message } => write!(f, "Server error ({}): {}", status, message),
            AppError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            AppError::Chart(msg) => write!(f, "Chart error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_view_deserialization() {
        let json = r#"{
            "requestId": "123e4567-e89b-12d3-a456-426614174000",
            "status": "warning",
            "mode": "single",
            "view": {
                "caption": "Showing data for Four Wheeler / ALL_MAKERS from 2020 to 2021.",
                "panels": [
                    {
                        "type": "chart",
                        "title": "Quarterly Vehicle Registrations",
                        "kind": "line",
                        "metric": "registrations",
                        "xLabel": "Year - Quarter",
                        "yLabel": "Registrations",
                        "points": [{"x": "2020Q1", "y": 1200.0}, {"x": "2020Q2", "y": null}],
                        "summary": "Total Registrations: 1200",
                        "diverging": false
                    },
                    {"type": "warning", "message": "No data available for Year-on-Year (YoY) Growth Rate"}
                ],
                "rows": [{
                    "Vehicle_Category": "Four Wheeler",
                    "Maker": "ALL_MAKERS",
                    "Year": 2020,
                    "Quarter": "Q1",
                    "Registrations": 1200.0,
                    "YearQuarter": "2020Q1",
                    "QoQ_Growth": null,
                    "YoY_Growth": null
                }],
                "rowCount": 1,
                "filter": {"category": "Four Wheeler", "makers": ["ALL_MAKERS"], "yearFrom": 2020, "yearTo": 2021}
            }
        }"#;

        let response: ViewResponse<SingleView> = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "warning");
        assert_eq!(response.mode, DashboardMode::Single);

        let ChartPanel::Chart(series) = &response.view.panels[0] else {
            panic!("expected chart");
        };
        assert_eq!(series.kind, ChartKind::Line);
        assert_eq!(series.points[1].y, None);
        assert!(matches!(response.view.panels[1], ChartPanel::Warning { .. }));
        assert_eq!(response.view.rows.unwrap()[0].year_quarter, "2020Q1");
    }

    #[test]
    fn test_comparison_notices() {
        let json = r#"{
            "caption": "",
            "notices": [{"level": "warning", "message": "Please select at least one manufacturer to compare."}],
            "makers": [],
            "filter": {"category": "Two Wheeler", "makers": [], "yearFrom": 2019, "yearTo": 2024}
        }"#;
        let view: ComparisonView = serde_json::from_str(json).unwrap();
        assert_eq!(view.notices[0].level, NoticeLevel::Warning);
        assert!(view.makers.is_empty());
    }

    #[test]
    fn test_options_and_logs() {
        let options: FilterOptions = serde_json::from_str(
            r#"{"categories":["Two Wheeler"],"category":"Two Wheeler","makers":["ALL_MAKERS","HERO"],
                "defaultMaker":"ALL_MAKERS","years":[2021],"defaultComparison":["ALL_MAKERS","HERO"],
                "maxComparison":5}"#,
        )
        .unwrap();
        assert_eq!(options.default_maker.as_deref(), Some("ALL_MAKERS"));

        let entry: LogEntry = serde_json::from_str(r#"{"level":"success","message":"done"}"#).unwrap();
        assert_eq!(entry.level, LogLevel::Success);
        assert_eq!(entry.indent, 0);
    }

    #[test]
    fn test_query_serialization() {
        let query = SingleQuery {
            category: "Four Wheeler".into(),
            maker: None,
            year_from: Some(2020),
            year_to: None,
            include_raw: true,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["yearFrom"], 2020);
        assert_eq!(json["includeRaw"], true);
    }
}
