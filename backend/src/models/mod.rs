//! Domain models for the registration pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`VehicleCategory`] - Two/Three/Four Wheeler (or Unknown)
//! - [`Month`] - Calendar month of a workbook column
//! - [`Quarter`] - Calendar quarter (Q1..Q4)
//! - [`RawRecord`] - One maker row of a yearly workbook
//! - [`QuarterlyRecord`] - One long-form row of the master table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maker label of the synthetic per-category aggregate rows.
pub const ALL_MAKERS: &str = "ALL_MAKERS";

// =============================================================================
// Vehicle Category
// =============================================================================

/// Vehicle category of a workbook, inferred from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleCategory {
    #[serde(rename = "Two Wheeler")]
    TwoWheeler,
    #[serde(rename = "Three Wheeler")]
    ThreeWheeler,
    #[serde(rename = "Four Wheeler")]
    FourWheeler,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl VehicleCategory {
    /// All categories, in display order.
    pub const ALL: [VehicleCategory; 4] = [
        Self::TwoWheeler,
        Self::ThreeWheeler,
        Self::FourWheeler,
        Self::Unknown,
    ];

    /// Display label, as written in the master table.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TwoWheeler => "Two Wheeler",
            Self::ThreeWheeler => "Three Wheeler",
            Self::FourWheeler => "Four Wheeler",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a display label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Month
// =============================================================================

/// Calendar month of a workbook column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months, January first.
    pub const ALL: [Month; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    const LONG_NAMES: [&'static str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    /// Month at a 0-based position (0 = January).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 0-based position (0 = January).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Short label ("Jan").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }

    /// Recognize a month header ("Jan", "JAN", "January", "sept").
    ///
    /// Returns `None` for headers that do not name a month.
    pub fn from_header(header: &str) -> Option<Self> {
        let normalized = header.trim().trim_end_matches('.').to_lowercase();
        if normalized.len() < 3 {
            return None;
        }
        Self::LONG_NAMES
            .iter()
            .position(|name| name.starts_with(normalized.as_str()))
            .and_then(Self::from_index)
    }

    /// Quarter this month belongs to.
    pub fn quarter(&self) -> Quarter {
        Quarter::ALL[self.index() / 3]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Quarter
// =============================================================================

/// Calendar quarter. Ordering is chronological (Q1 < Q2 < Q3 < Q4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display key concatenating year and quarter ("2021Q1").
pub fn year_quarter(year: i32, quarter: Quarter) -> String {
    format!("{}{}", year, quarter.label())
}

// =============================================================================
// Records
// =============================================================================

/// One maker row of a yearly workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub maker: String,
    /// Counts for the recognized month columns, in calendar order.
    pub monthly: Vec<(Month, f64)>,
    pub year: i32,
    pub vehicle_category: VehicleCategory,
}

impl RawRecord {
    /// Count for a month, `None` when the workbook has no such column.
    pub fn month(&self, month: Month) -> Option<f64> {
        self.monthly
            .iter()
            .find(|(m, _)| *m == month)
            .map(|(_, v)| *v)
    }
}

/// One long-form row of the master table.
///
/// Serialized field names match the master table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyRecord {
    #[serde(rename = "Vehicle_Category")]
    pub vehicle_category: VehicleCategory,
    #[serde(rename = "Maker")]
    pub maker: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Quarter")]
    pub quarter: Quarter,
    #[serde(rename = "Registrations")]
    pub registrations: Option<f64>,
    #[serde(rename = "YearQuarter")]
    pub year_quarter: String,
    #[serde(rename = "QoQ_Growth")]
    pub qoq_growth: Option<f64>,
    #[serde(rename = "YoY_Growth")]
    pub yoy_growth: Option<f64>,
}

impl QuarterlyRecord {
    /// New record without growth values.
    pub fn new(
        vehicle_category: VehicleCategory,
        maker: impl Into<String>,
        year: i32,
        quarter: Quarter,
        registrations: Option<f64>,
    ) -> Self {
        Self {
            vehicle_category,
            maker: maker.into(),
            year,
            quarter,
            registrations,
            year_quarter: year_quarter(year, quarter),
            qoq_growth: None,
            yoy_growth: None,
        }
    }

    /// Whether this is a synthetic `ALL_MAKERS` row.
    pub fn is_aggregate(&self) -> bool {
        self.maker == ALL_MAKERS
    }

    /// Chronological sort key within a series.
    pub fn period(&self) -> (i32, Quarter) {
        (self.year, self.quarter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        for category in VehicleCategory::ALL {
            assert_eq!(VehicleCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(VehicleCategory::from_label(" Four Wheeler "), Some(VehicleCategory::FourWheeler));
        assert_eq!(VehicleCategory::from_label("four wheeler"), None);
    }

    #[test]
    fn test_category_serde_uses_label() {
        let json = serde_json::to_string(&VehicleCategory::ThreeWheeler).unwrap();
        assert_eq!(json, "\"Three Wheeler\"");
    }

    #[test]
    fn test_month_headers() {
        assert_eq!(Month::from_header("Jan"), Some(Month::Jan));
        assert_eq!(Month::from_header("JUNE"), Some(Month::Jun));
        assert_eq!(Month::from_header("Sept."), Some(Month::Sep));
        assert_eq!(Month::from_header("december"), Some(Month::Dec));
        assert_eq!(Month::from_header("TOTAL"), None);
        assert_eq!(Month::from_header("1"), None);
        assert_eq!(Month::from_header("Ma"), None);
    }

    #[test]
    fn test_month_quarters() {
        assert_eq!(Month::Mar.quarter(), Quarter::Q1);
        assert_eq!(Month::Apr.quarter(), Quarter::Q2);
        assert_eq!(Month::Sep.quarter(), Quarter::Q3);
        assert_eq!(Month::Dec.quarter(), Quarter::Q4);
    }

    #[test]
    fn test_quarter_order() {
        let mut quarters = vec![Quarter::Q4, Quarter::Q1, Quarter::Q3, Quarter::Q2];
        quarters.sort();
        assert_eq!(quarters, Quarter::ALL);
        assert_eq!(Quarter::Q3.to_string(), "Q3");
    }

    #[test]
    fn test_year_quarter_key() {
        let record = QuarterlyRecord::new(VehicleCategory::TwoWheeler, "X", 2021, Quarter::Q1, Some(600.0));
        assert_eq!(record.year_quarter, "2021Q1");
        assert!(!record.is_aggregate());
    }
}
