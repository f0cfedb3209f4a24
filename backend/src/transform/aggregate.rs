//! Per-category `ALL_MAKERS` aggregate rows.

use std::collections::BTreeMap;

use super::growth::apply_growth;
use super::quarterly::add_optional;
use crate::models::{Quarter, QuarterlyRecord, VehicleCategory, ALL_MAKERS};

/// Sum registrations across all makers per Category+Year+Quarter.
///
/// The total is null only when every maker's value is null for that period.
/// Growth is recomputed on the aggregate series. Existing `ALL_MAKERS` rows in
/// the input are ignored.
pub fn aggregate_all_makers(rows: &[QuarterlyRecord]) -> Vec<QuarterlyRecord> {
    let mut totals: BTreeMap<(VehicleCategory, i32, Quarter), Option<f64>> = BTreeMap::new();

    for row in rows.iter().filter(|r| !r.is_aggregate()) {
        let slot = totals
            .entry((row.vehicle_category, row.year, row.quarter))
            .or_insert(None);
        *slot = add_optional(*slot, row.registrations);
    }

    let mut aggregates: Vec<QuarterlyRecord> = totals
        .into_iter()
        .map(|((category, year, quarter), registrations)| {
            QuarterlyRecord::new(category, ALL_MAKERS, year, quarter, registrations)
        })
        .collect();

    apply_growth(&mut aggregates);
    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: VehicleCategory, maker: &str, year: i32, quarter: Quarter, value: Option<f64>) -> QuarterlyRecord {
        QuarterlyRecord::new(category, maker, year, quarter, value)
    }

    #[test]
    fn test_sums_makers_per_period() {
        let rows = vec![
            row(VehicleCategory::FourWheeler, "A", 2021, Quarter::Q1, Some(10.0)),
            row(VehicleCategory::FourWheeler, "B", 2021, Quarter::Q1, Some(5.0)),
            row(VehicleCategory::FourWheeler, "A", 2021, Quarter::Q2, Some(30.0)),
            row(VehicleCategory::TwoWheeler, "C", 2021, Quarter::Q1, Some(7.0)),
        ];
        let aggregates = aggregate_all_makers(&rows);

        assert_eq!(aggregates.len(), 3);
        assert!(aggregates.iter().all(|r| r.maker == ALL_MAKERS));

        let four_q1 = aggregates
            .iter()
            .find(|r| r.vehicle_category == VehicleCategory::FourWheeler && r.quarter == Quarter::Q1)
            .unwrap();
        assert_eq!(four_q1.registrations, Some(15.0));
        assert_eq!(four_q1.year_quarter, "2021Q1");

        let four_q2 = aggregates
            .iter()
            .find(|r| r.vehicle_category == VehicleCategory::FourWheeler && r.quarter == Quarter::Q2)
            .unwrap();
        assert_eq!(four_q2.qoq_growth, Some(100.0));
    }

    #[test]
    fn test_aggregate_equals_sum_of_makers() {
        let mut rows = Vec::new();
        for (i, maker) in ["A", "B", "C"].iter().enumerate() {
            for year in 2020..=2022 {
                for quarter in Quarter::ALL {
                    let value = (i as f64 + 1.0) * (year - 2019) as f64 * (quarter as u8 + 1) as f64;
                    rows.push(row(VehicleCategory::ThreeWheeler, maker, year, quarter, Some(value)));
                }
            }
        }
        let aggregates = aggregate_all_makers(&rows);

        for agg in &aggregates {
            let expected: f64 = rows
                .iter()
                .filter(|r| r.year == agg.year && r.quarter == agg.quarter)
                .filter_map(|r| r.registrations)
                .sum();
            assert_eq!(agg.registrations, Some(expected));
        }
        assert!(aggregates[..4].iter().all(|r| r.yoy_growth.is_none()));
        assert!(aggregates[4].yoy_growth.is_some());
    }

    #[test]
    fn test_all_null_period_stays_null() {
        let rows = vec![
            row(VehicleCategory::TwoWheeler, "A", 2024, Quarter::Q4, None),
            row(VehicleCategory::TwoWheeler, "B", 2024, Quarter::Q4, None),
        ];
        let aggregates = aggregate_all_makers(&rows);
        assert_eq!(aggregates[0].registrations, None);
    }

    #[test]
    fn test_existing_aggregates_ignored() {
        let rows = vec![
            row(VehicleCategory::TwoWheeler, "A", 2024, Quarter::Q1, Some(1.0)),
            row(VehicleCategory::TwoWheeler, ALL_MAKERS, 2024, Quarter::Q1, Some(1.0)),
        ];
        let aggregates = aggregate_all_makers(&rows);
        assert_eq!(aggregates[0].registrations, Some(1.0));
    }
}
