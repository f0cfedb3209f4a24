//! Reshape monthly workbook rows into long-form quarterly rows.
//!
//! ```text
//! Maker | Jan | Feb | ... | Sep          Maker | Year | Quarter | Registrations
//! X     | 100 | 200 | ... | 90     →     X     | 2021 | Q1      | 600
//!                                        X     | 2021 | Q2      | ...
//!                                        X     | 2021 | Q3      | ...
//!                                        X     | 2021 | Q4      | (null)
//! ```

use std::collections::BTreeMap;

use crate::models::{Month, Quarter, QuarterlyRecord, RawRecord, VehicleCategory};

type SeriesKey = (VehicleCategory, String, i32, Quarter);

/// Sum of the constituent month values present in the record.
///
/// `None` when the record has none of the quarter's months.
pub fn quarter_total(record: &RawRecord, quarter: Quarter) -> Option<f64> {
    Month::ALL
        .iter()
        .filter(|m| m.quarter() == quarter)
        .filter_map(|m| record.month(*m))
        .fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

/// Reshape raw records to one row per Category+Maker+Year+Quarter.
///
/// Records sharing a (Category, Maker, Year) are merged by summing their
/// quarter values. Output is sorted by (Category, Maker, Year, Quarter) and
/// has no growth values yet.
pub fn to_quarterly(records: &[RawRecord]) -> Vec<QuarterlyRecord> {
    let mut totals: BTreeMap<SeriesKey, Option<f64>> = BTreeMap::new();

    for record in records {
        for quarter in Quarter::ALL {
            let key = (record.vehicle_category, record.maker.clone(), record.year, quarter);
            let value = quarter_total(record, quarter);
            let slot = totals.entry(key).or_insert(None);
            *slot = add_optional(*slot, value);
        }
    }

    totals
        .into_iter()
        .map(|((category, maker, year, quarter), registrations)| {
            QuarterlyRecord::new(category, maker, year, quarter, registrations)
        })
        .collect()
}

/// Null-aware sum: null only when both sides are null.
pub(crate) fn add_optional(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(maker: &str, year: i32, values: &[f64]) -> RawRecord {
        RawRecord {
            maker: maker.to_string(),
            monthly: values
                .iter()
                .enumerate()
                .map(|(i, v)| (Month::ALL[i], *v))
                .collect(),
            year,
            vehicle_category: VehicleCategory::TwoWheeler,
        }
    }

    #[test]
    fn test_q1_is_sum_of_first_three_months() {
        let rows = to_quarterly(&[raw("X", 2021, &[100.0, 200.0, 300.0])]);

        let q1 = rows.iter().find(|r| r.quarter == Quarter::Q1).unwrap();
        assert_eq!(q1.registrations, Some(600.0));
        assert_eq!(q1.year_quarter, "2021Q1");
        assert_eq!(q1.vehicle_category, VehicleCategory::TwoWheeler);
    }

    #[test]
    fn test_missing_quarter_months_yield_null() {
        // Jan..Aug: Q3 is partial, Q4 has no columns at all
        let rows = to_quarterly(&[raw("X", 2024, &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0])]);

        let values: Vec<Option<f64>> = rows.iter().map(|r| r.registrations).collect();
        assert_eq!(values, vec![Some(3.0), Some(6.0), Some(6.0), None]);
    }

    #[test]
    fn test_one_row_per_quarter_sorted() {
        let rows = to_quarterly(&[raw("B", 2021, &[1.0; 12]), raw("A", 2021, &[2.0; 12]), raw("A", 2020, &[3.0; 12])]);

        assert_eq!(rows.len(), 12);
        let keys: Vec<(String, i32, Quarter)> = rows.iter().map(|r| (r.maker.clone(), r.year, r.quarter)).collect();
        assert_eq!(keys[0], ("A".to_string(), 2020, Quarter::Q1));
        assert_eq!(keys[4], ("A".to_string(), 2021, Quarter::Q1));
        assert_eq!(keys[11], ("B".to_string(), 2021, Quarter::Q4));
        assert!(rows.iter().all(|r| r.qoq_growth.is_none() && r.yoy_growth.is_none()));
    }

    #[test]
    fn test_duplicate_series_merged() {
        let rows = to_quarterly(&[raw("X", 2021, &[1.0, 2.0, 3.0]), raw("X", 2021, &[10.0, 20.0, 30.0])]);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].registrations, Some(66.0));
        assert_eq!(rows[1].registrations, None);
    }

    #[test]
    fn test_add_optional() {
        assert_eq!(add_optional(None, None), None);
        assert_eq!(add_optional(Some(1.0), None), Some(1.0));
        assert_eq!(add_optional(Some(1.0), Some(2.5)), Some(3.5));
    }
}
