//! Chart data series built from filtered rows.
//!
//! Rendering is left to the plotting collaborator; a panel is either plain
//! chart data or the warning shown in its place.

use serde::{Deserialize, Serialize};

use crate::models::QuarterlyRecord;

/// Chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// Column plotted on the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Registrations,
    QoqGrowth,
    YoyGrowth,
}

impl Metric {
    pub fn value(&self, row: &QuarterlyRecord) -> Option<f64> {
        match self {
            Self::Registrations => row.registrations,
            Self::QoqGrowth => row.qoq_growth,
            Self::YoyGrowth => row.yoy_growth,
        }
    }

    /// Y axis label.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Self::Registrations => "Registrations",
            Self::QoqGrowth => "QoQ Growth (%)",
            Self::YoyGrowth => "YoY Growth (%)",
        }
    }
}

/// One point: YearQuarter key and value (null values leave a gap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: Option<f64>,
}

/// Data for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    pub metric: Metric,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
    /// Headline figure shown above the chart
    pub summary: Option<String>,
    /// Color bars by value (red for decline, green for growth)
    pub diverging: bool,
}

/// A chart, or the warning displayed instead of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartPanel {
    Chart(ChartSeries),
    Warning { message: String },
}

impl ChartPanel {
    pub fn is_chart(&self) -> bool {
        matches!(self, Self::Chart(_))
    }
}

/// Presentation of one panel.
#[derive(Debug, Clone)]
pub(crate) struct PanelSpec {
    pub metric: Metric,
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    /// Text substituted when there is nothing to plot
    pub empty_message: String,
    pub with_summary: bool,
}

/// Build a panel, or its warning when no row has a value for the metric.
pub(crate) fn build_panel(rows: &[QuarterlyRecord], spec: &PanelSpec) -> ChartPanel {
    let values: Vec<f64> = rows.iter().filter_map(|r| spec.metric.value(r)).collect();
    if values.is_empty() {
        return ChartPanel::Warning {
            message: spec.empty_message.clone(),
        };
    }

    let summary = spec.with_summary.then(|| summary_line(spec.metric, &values));

    ChartPanel::Chart(ChartSeries {
        title: spec.title.to_string(),
        kind: spec.kind,
        metric: spec.metric,
        x_label: spec.x_label.to_string(),
        y_label: spec.metric.axis_label().to_string(),
        points: rows
            .iter()
            .map(|r| ChartPoint {
                x: r.year_quarter.clone(),
                y: spec.metric.value(r),
            })
            .collect(),
        summary,
        diverging: spec.kind == ChartKind::Bar && spec.metric != Metric::Registrations,
    })
}

fn summary_line(metric: Metric, values: &[f64]) -> String {
    match metric {
        Metric::Registrations => {
            let total: f64 = values.iter().sum();
            format!("Total Registrations: {}", total.trunc() as i64)
        }
        Metric::QoqGrowth => format!("Average QoQ Growth: {:.2}%", mean(values)),
        Metric::YoyGrowth => format!("Average YoY Growth: {:.2}%", mean(values)),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
