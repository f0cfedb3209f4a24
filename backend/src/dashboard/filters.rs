//! Filter options and row filtering over the master table.

use serde::{Deserialize, Serialize};

use crate::models::{QuarterlyRecord, VehicleCategory, ALL_MAKERS};
use crate::table::MasterTable;

/// Maximum number of makers in comparison mode.
pub const MAX_COMPARISON_MAKERS: usize = 5;

/// Dashboard mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardMode {
    /// Single manufacturer detail
    Single,
    /// Side-by-side comparison of up to 5 manufacturers
    Comparison,
}

/// Widget choices for a category, with their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// All categories in the table
    pub categories: Vec<VehicleCategory>,
    /// Category the maker lists below belong to
    pub category: Option<VehicleCategory>,
    /// Sorted makers of `category`
    pub makers: Vec<String>,
    /// `ALL_MAKERS` when present, else the first maker
    pub default_maker: Option<String>,
    /// Sorted years across the table
    pub years: Vec<i32>,
    /// First makers preselected in comparison mode
    pub default_comparison: Vec<String>,
    pub max_comparison: usize,
}

/// Compute filter options. Without a requested category (or with one the
/// table does not contain), the first category is used.
pub fn filter_options(table: &MasterTable, category: Option<VehicleCategory>) -> FilterOptions {
    let categories = table.categories();
    let category = category
        .filter(|c| categories.contains(c))
        .or_else(|| categories.first().copied());

    let makers = category.map(|c| table.makers(c)).unwrap_or_default();
    let default_maker = default_maker(&makers);
    let default_comparison = makers.iter().take(MAX_COMPARISON_MAKERS).cloned().collect();

    FilterOptions {
        categories,
        category,
        makers,
        default_maker,
        years: table.years(),
        default_comparison,
        max_comparison: MAX_COMPARISON_MAKERS,
    }
}

fn default_maker(makers: &[String]) -> Option<String> {
    if makers.iter().any(|m| m == ALL_MAKERS) {
        Some(ALL_MAKERS.to_string())
    } else {
        makers.first().cloned()
    }
}

/// Row selection: one category, a set of makers, an inclusive year range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFilter {
    pub category: VehicleCategory,
    pub makers: Vec<String>,
    pub year_from: i32,
    pub year_to: i32,
}

impl RowFilter {
    /// Filter with the year range defaulted to the table span.
    ///
    /// A reversed range is swapped.
    pub fn new(
        table: &MasterTable,
        category: VehicleCategory,
        makers: Vec<String>,
        year_from: Option<i32>,
        year_to: Option<i32>,
    ) -> Self {
        let years = table.years();
        let first = years.first().copied().unwrap_or_default();
        let last = years.last().copied().unwrap_or_default();
        let (mut from, mut to) = (year_from.unwrap_or(first), year_to.unwrap_or(last));
        if from > to {
            std::mem::swap(&mut from, &mut to);
        }
        Self {
            category,
            makers,
            year_from: from,
            year_to: to,
        }
    }

    fn matches(&self, row: &QuarterlyRecord) -> bool {
        row.vehicle_category == self.category
            && self.makers.iter().any(|m| *m == row.maker)
            && (self.year_from..=self.year_to).contains(&row.year)
    }
}

/// Rows matching the filter, sorted by (Maker, Year, Quarter).
pub fn filter_rows(table: &MasterTable, filter: &RowFilter) -> Vec<QuarterlyRecord> {
    let mut rows: Vec<QuarterlyRecord> = table
        .rows()
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    rows.sort_by(|a, b| (&a.maker, a.year, a.quarter).cmp(&(&b.maker, b.year, b.quarter)));
    rows
}
