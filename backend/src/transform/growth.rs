//! Quarter-over-quarter and year-over-year growth.
//!
//! Growth is computed within a (Category, Maker) series and is only
//! produced when both registrations are known.

use std::collections::HashMap;

use crate::models::{Quarter, QuarterlyRecord, VehicleCategory};

/// Percent change from `previous` to `current`.
///
/// `None` when either side is unknown or `previous` is zero.
pub fn pct_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (current?, previous?);
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Fill `qoq_growth` and `yoy_growth` for every row.
///
/// QoQ compares against the preceding row of the series in (Year, Quarter)
/// order, whatever period that is. YoY compares against the same quarter
/// one year earlier and is null when that period is absent.
pub fn apply_growth(rows: &mut [QuarterlyRecord]) {
    let mut series: HashMap<(VehicleCategory, &str), Vec<usize>> = HashMap::new();
    for (i, r) in rows.iter().enumerate() {
        series.entry((r.vehicle_category, r.maker.as_str())).or_default().push(i);
    }

    let registrations: HashMap<(VehicleCategory, &str, i32, Quarter), Option<f64>> = rows
        .iter()
        .map(|r| ((r.vehicle_category, r.maker.as_str(), r.year, r.quarter), r.registrations))
        .collect();

    let mut growth = vec![(None, None); rows.len()];
    for ((category, maker), mut indices) in series {
        indices.sort_by_key(|&i| rows[i].period());
        let mut previous: Option<Option<f64>> = None;
        for i in indices {
            let row = &rows[i];
            let qoq = previous.and_then(|prev| pct_change(row.registrations, prev));
            let last_year = registrations
                .get(&(category, maker, row.year - 1, row.quarter))
                .copied()
                .flatten();
            growth[i] = (qoq, pct_change(row.registrations, last_year));
            previous = Some(row.registrations);
        }
    }

    for (row, (qoq, yoy)) in rows.iter_mut().zip(growth) {
        row.qoq_growth = qoq;
        row.yoy_growth = yoy;
    }
}
