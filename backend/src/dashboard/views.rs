//! Single-maker and comparison views.
//!
//! Both views are pure functions of the table and the query: every
//! trigger recomputes the full view.

use serde::{Deserialize, Serialize};

use super::charts::{build_panel, ChartKind, ChartPanel, Metric, PanelSpec};
use super::filters::{filter_options, filter_rows, RowFilter, MAX_COMPARISON_MAKERS};
use crate::models::{QuarterlyRecord, VehicleCategory};
use crate::table::MasterTable;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

// =============================================================================
// Single maker
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleQuery {
    pub category: VehicleCategory,
    /// Defaults to `ALL_MAKERS` (or the first maker) of the category
    #[serde(default)]
    pub maker: Option<String>,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
    #[serde(default)]
    pub include_raw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleView {
    pub caption: String,
    /// Registrations, QoQ and YoY panels, in that order
    pub panels: Vec<ChartPanel>,
    /// Filtered rows, only when requested
    pub rows: Option<Vec<QuarterlyRecord>>,
    pub row_count: usize,
    pub filter: RowFilter,
}

fn single_panels() -> [PanelSpec; 3] {
    [
        PanelSpec {
            metric: Metric::Registrations,
            kind: ChartKind::Line,
            title: "Quarterly Vehicle Registrations",
            x_label: "Year - Quarter",
            empty_message: "No data available for Quarterly Vehicle Registrations".to_string(),
            with_summary: true,
        },
        PanelSpec {
            metric: Metric::QoqGrowth,
            kind: ChartKind::Bar,
            title: "Quarter-on-Quarter Growth Rate",
            x_label: "Year - Quarter",
            empty_message: "No data available for Quarter-on-Quarter (QoQ) Growth Rate".to_string(),
            with_summary: true,
        },
        PanelSpec {
            metric: Metric::YoyGrowth,
            kind: ChartKind::Bar,
            title: "Year-on-Year Growth Rate",
            x_label: "Year - Quarter",
            empty_message: "No data available for Year-on-Year (YoY) Growth Rate".to_string(),
            with_summary: true,
        },
    ]
}

/// Detail view of one maker.
pub fn single_view(table: &MasterTable, query: &SingleQuery) -> SingleView {
    let maker = query
        .maker
        .clone()
        .filter(|m| !m.trim().is_empty())
        .or_else(|| filter_options(table, Some(query.category)).default_maker)
        .unwrap_or_default();

    let filter = RowFilter::new(
        table,
        query.category,
        vec![maker.clone()],
        query.year_from,
        query.year_to,
    );
    let rows = filter_rows(table, &filter);

    let caption = format!(
        "Showing data for {} / {} from {} to {}.",
        query.category, maker, filter.year_from, filter.year_to
    );
    let panels = single_panels().iter().map(|spec| build_panel(&rows, spec)).collect();

    SingleView {
        caption,
        panels,
        row_count: rows.len(),
        rows: query.include_raw.then_some(rows),
        filter,
    }
}

// =============================================================================
// Comparison
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonQuery {
    pub category: VehicleCategory,
    #[serde(default)]
    pub makers: Vec<String>,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
}

/// Panels of one compared maker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakerPanels {
    pub maker: String,
    pub panels: Vec<ChartPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    /// Empty when there is nothing to compare
    pub caption: String,
    pub notices: Vec<Notice>,
    pub makers: Vec<MakerPanels>,
    pub filter: RowFilter,
}

fn comparison_panels() -> [PanelSpec; 3] {
    [
        PanelSpec {
            metric: Metric::Registrations,
            kind: ChartKind::Line,
            title: "Registrations",
            x_label: "Year-Quarter",
            empty_message: "No registration data available".to_string(),
            with_summary: false,
        },
        PanelSpec {
            metric: Metric::QoqGrowth,
            kind: ChartKind::Line,
            title: "QoQ Growth (%)",
            x_label: "Year-Quarter",
            empty_message: "No QoQ growth data available".to_string(),
            with_summary: false,
        },
        PanelSpec {
            metric: Metric::YoyGrowth,
            kind: ChartKind::Line,
            title: "YoY Growth (%)",
            x_label: "Year-Quarter",
            empty_message: "No YoY growth data available".to_string(),
            with_summary: false,
        },
    ]
}

/// Side-by-side view of up to [`MAX_COMPARISON_MAKERS`] makers.
pub fn comparison_view(table: &MasterTable, query: &ComparisonQuery) -> ComparisonView {
    let mut notices = Vec::new();

    let mut makers: Vec<String> = Vec::new();
    for maker in query.makers.iter().map(|m| m.trim()).filter(|m| !m.is_empty()) {
        if !makers.iter().any(|m| m == maker) {
            makers.push(maker.to_string());
        }
    }
    if makers.len() > MAX_COMPARISON_MAKERS {
        notices.push(Notice::warning(format!(
            "At most {} manufacturers can be compared; showing the first {}.",
            MAX_COMPARISON_MAKERS, MAX_COMPARISON_MAKERS
        )));
        makers.truncate(MAX_COMPARISON_MAKERS);
    }

    let filter = RowFilter::new(table, query.category, makers, query.year_from, query.year_to);
    let empty = |notices: Vec<Notice>, filter: RowFilter| ComparisonView {
        caption: String::new(),
        notices,
        makers: Vec::new(),
        filter,
    };

    if filter.makers.is_empty() {
        notices.push(Notice::warning("Please select at least one manufacturer to compare."));
        return empty(notices, filter);
    }

    let rows = filter_rows(table, &filter);
    if rows.is_empty() {
        notices.push(Notice::warning(
            "No data available for the selected manufacturers and date range.",
        ));
        return empty(notices, filter);
    }

    let specs = comparison_panels();
    let makers = filter
        .makers
        .iter()
        .map(|maker| {
            let maker_rows: Vec<QuarterlyRecord> =
                rows.iter().filter(|r| r.maker == *maker).cloned().collect();
            MakerPanels {
                maker: maker.clone(),
                panels: specs.iter().map(|spec| build_panel(&maker_rows, spec)).collect(),
            }
        })
        .collect();

    ComparisonView {
        caption: format!(
            "Comparing manufacturers in {} from {} to {}:",
            query.category, filter.year_from, filter.year_to
        ),
        notices,
        makers,
        filter,
    }
}
