//! Raw master table rows for the single-maker view.

use leptos::*;

use crate::QuarterlyRow;

/// Display form of an optional value: two decimals, blank when null.
pub fn format_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

#[component]
pub fn RawTable(rows: Vec<QuarterlyRow>) -> impl IntoView {
    let count = rows.len();
    view! {
        <div class="raw-table">
            <h3>{format!("Raw Data ({} rows)", count)}</h3>
            <table>
                <thead>
                    <tr>
                        <th>"Vehicle_Category"</th>
                        <th>"Maker"</th>
                        <th>"Year"</th>
                        <th>"Quarter"</th>
                        <th>"Registrations"</th>
                        <th>"YearQuarter"</th>
                        <th>"QoQ_Growth"</th>
                        <th>"YoY_Growth"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| view! {
                            <tr>
                                <td>{row.vehicle_category}</td>
                                <td>{row.maker}</td>
                                <td>{row.year}</td>
                                <td>{row.quarter}</td>
                                <td class="num">{format_cell(row.registrations)}</td>
                                <td>{row.year_quarter}</td>
                                <td class="num">{format_cell(row.qoq_growth)}</td>
                                <td class="num">{format_cell(row.yoy_growth)}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(Some(12.345)), "12.35");
        assert_eq!(format_cell(Some(-5.0)), "-5.00");
        assert_eq!(format_cell(None), "");
    }
}
