//! Dashboard view model.
//!
//! Filtering and chart-data construction over a shared [`MasterTable`]
//! (`crate::table::MasterTable`). Everything here is side-effect free;
//! the frontend renders the returned series through Plotly.

pub mod charts;
pub mod filters;
pub mod views;

pub use charts::{ChartKind, ChartPanel, ChartPoint, ChartSeries, Metric};
pub use filters::{filter_options, filter_rows, DashboardMode, FilterOptions, RowFilter, MAX_COMPARISON_MAKERS};
pub use views::{
    comparison_view, single_view, ComparisonQuery, ComparisonView, MakerPanels, Notice, NoticeLevel, SingleQuery,
    SingleView,
};

#[cfg(test)]
pub(crate) mod tests {
    use crate::models::{Quarter, QuarterlyRecord, VehicleCategory};
    use crate::table::MasterTable;
    use crate::transform::{aggregate_all_makers, apply_growth};

    /// Two Wheeler (one maker, 2021) followed by Four Wheeler
    /// (MAHINDRA, MARUTI, TATA over 2019..=2022) plus aggregates.
    pub(crate) fn sample_table() -> MasterTable {
        let mut rows: Vec<QuarterlyRecord> = Quarter::ALL
            .iter()
            .map(|q| {
                QuarterlyRecord::new(
                    VehicleCategory::TwoWheeler,
                    "HERO",
                    2021,
                    *q,
                    Some(1000.0 * (*q as u8 + 1) as f64),
                )
            })
            .collect();

        for (i, maker) in ["MARUTI", "TATA", "MAHINDRA"].iter().enumerate() {
            for year in 2019..=2022 {
                for quarter in Quarter::ALL {
                    let value = (i as f64 + 1.0) * 100.0 + (year - 2019) as f64 * 40.0 + (quarter as u8 + 1) as f64 * 10.0;
                    rows.push(QuarterlyRecord::new(
                        VehicleCategory::FourWheeler,
                        *maker,
                        year,
                        quarter,
                        Some(value),
                    ));
                }
            }
        }

        apply_growth(&mut rows);
        let aggregates = aggregate_all_makers(&rows);
        rows.extend(aggregates);
        MasterTable::from_rows(rows)
    }

    #[test]
    fn test_sample_table_shape() {
        let table = sample_table();
        assert_eq!(
            table.categories(),
            vec![VehicleCategory::TwoWheeler, VehicleCategory::FourWheeler]
        );
        assert_eq!(table.len(), 4 + 48 + 4 + 16);
    }
}
