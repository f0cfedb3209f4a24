//! Yearly workbook parser.
//!
//! Reads one `.xlsx` export (title rows, a header row, then one row per maker
//! with monthly counts) into [`RawRecord`]s. No quarter or growth logic here.
//!
//! ```text
//!  row 0..3   title rows (skipped)
//!  row 4      S No | Maker | JAN | FEB | ... | TOTAL
//!  row 5..    1    | HERO  | 100 | 200 | ... | 300
//!                  |       |  10 |  20 | ... |        <- merged maker cell
//! ```

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{WorkbookError, WorkbookResult};
use crate::models::{Month, RawRecord, VehicleCategory};

/// Absolute row index of the header row (four title rows precede it).
pub const DEFAULT_HEADER_ROW: usize = 4;

/// Absolute column index of the Maker column (column 0 is a serial number).
pub const DEFAULT_MAKER_COLUMN: usize = 1;

/// Sheet layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Absolute row index of the header row
    pub header_row: usize,
    /// Absolute column index of the Maker column; month columns follow it
    pub maker_column: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            header_row: DEFAULT_HEADER_ROW,
            maker_column: DEFAULT_MAKER_COLUMN,
        }
    }
}

/// Result of parsing one workbook.
#[derive(Debug, Clone)]
pub struct WorkbookData {
    /// File label used in logs
    pub source: String,
    pub year: i32,
    pub category: VehicleCategory,
    /// Months assigned to the recognized columns, January first
    pub months: Vec<Month>,
    /// One record per maker, in first-seen order
    pub records: Vec<RawRecord>,
}

/// Infer the vehicle category from a workbook file name.
///
/// Substrings are checked in order: "two", "three", "four".
///
/// # Example
/// ```
/// use regtrack::{classify_category, VehicleCategory};
///
/// assert_eq!(classify_category("Two_Wheeler_2021.xlsx"), VehicleCategory::TwoWheeler);
/// assert_eq!(classify_category("summary.xlsx"), VehicleCategory::Unknown);
/// ```
pub fn classify_category(file_name: &str) -> VehicleCategory {
    let name = file_name.to_lowercase();
    if name.contains("two") {
        VehicleCategory::TwoWheeler
    } else if name.contains("three") {
        VehicleCategory::ThreeWheeler
    } else if name.contains("four") {
        VehicleCategory::FourWheeler
    } else {
        VehicleCategory::Unknown
    }
}

/// Read the first sheet of a workbook file.
pub fn read_workbook(
    path: &Path,
    year: i32,
    category: VehicleCategory,
    options: &ParseOptions,
) -> WorkbookResult<WorkbookData> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| WorkbookError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| WorkbookError::NoSheet(path.to_path_buf()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| WorkbookError::Sheet {
            sheet: sheet_name.clone(),
            message: e.to_string(),
        })?;

    let mut data = parse_sheet(&range, year, category, options)?;
    data.source = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(data)
}

/// Parse a sheet range into raw records.
///
/// Row and column offsets in `options` are absolute sheet positions, whatever
/// the first used cell of the range is.
pub fn parse_sheet(
    range: &Range<Data>,
    year: i32,
    category: VehicleCategory,
    options: &ParseOptions,
) -> WorkbookResult<WorkbookData> {
    let end = range.end().map(|(r, c)| (r as usize, c as usize));
    let (last_row, last_col) = match end {
        Some(end) if end.0 >= options.header_row => end,
        _ => {
            return Err(WorkbookError::MissingHeaderRow {
                row: options.header_row,
                available: end.map(|(r, _)| r + 1).unwrap_or(0),
            })
        }
    };

    if last_col < options.maker_column {
        return Err(WorkbookError::NoMakerColumn(last_col + 1));
    }

    let month_columns = month_columns(range, options, last_col)?;
    let months: Vec<Month> = month_columns.iter().map(|(_, m)| *m).collect();

    let mut records: Vec<RawRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut current_maker: Option<String> = None;

    for row in (options.header_row + 1)..=last_row {
        let maker_cell = cell_text(cell(range, row, options.maker_column));

        let has_numbers = month_columns
            .iter()
            .any(|(col, _)| !is_blank(cell(range, row, *col)));

        if maker_cell.is_empty() && !has_numbers {
            continue;
        }

        // Merged maker cells only carry a value on their first row
        if !maker_cell.is_empty() {
            current_maker = Some(maker_cell);
        }
        let Some(maker) = current_maker.clone() else {
            continue;
        };

        let values: Vec<(Month, f64)> = month_columns
            .iter()
            .map(|(col, month)| (*month, cell_number(cell(range, row, *col))))
            .collect();

        match index.get(&maker) {
            Some(&i) => {
                for (slot, (_, value)) in records[i].monthly.iter_mut().zip(values) {
                    slot.1 += value;
                }
            }
            None => {
                index.insert(maker.clone(), records.len());
                records.push(RawRecord {
                    maker,
                    monthly: values,
                    year,
                    vehicle_category: category,
                });
            }
        }
    }

    Ok(WorkbookData {
        source: String::new(),
        year,
        category,
        months,
        records,
    })
}

/// Locate month columns and assign months positionally.
fn month_columns(
    range: &Range<Data>,
    options: &ParseOptions,
    last_col: usize,
) -> WorkbookResult<Vec<(usize, Month)>> {
    let mut candidates: Vec<(usize, String)> = ((options.maker_column + 1)..=last_col)
        .map(|col| (col, cell_text(cell(range, options.header_row, col))))
        .filter(|(_, header)| !header.to_lowercase().contains("total"))
        .collect();

    while candidates.last().is_some_and(|(_, header)| header.is_empty()) {
        candidates.pop();
    }

    if candidates.len() > Month::ALL.len() {
        return Err(WorkbookError::TooManyMonthColumns(candidates.len()));
    }

    candidates
        .into_iter()
        .enumerate()
        .map(|(position, (col, header))| {
            let expected = Month::ALL[position];
            match Month::from_header(&header) {
                Some(named) if named != expected => Err(WorkbookError::MonthOutOfOrder {
                    header,
                    position,
                    expected: expected.label().to_string(),
                }),
                _ => Ok((col, expected)),
            }
        })
        .collect()
}

fn cell(range: &Range<Data>, row: usize, col: usize) -> Option<&Data> {
    range.get_value((row as u32, col as u32))
}

fn is_blank(cell: Option<&Data>) -> bool {
    match cell {
        None | Some(Data::Empty) => true,
        Some(Data::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

/// Cell as trimmed text, without surrounding quotes.
fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(value) => value.to_string().trim().trim_matches('"').trim().to_string(),
    }
}

/// Coerce a cell to a count. Anything unparseable counts as zero.
fn cell_number(cell: Option<&Data>) -> f64 {
    let value = match cell {
        Some(Data::Int(i)) => *i as f64,
        Some(Data::Float(f)) => *f,
        Some(Data::String(s)) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .collect();
            cleaned.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    };
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    /// Build a sheet range: four title rows, a header row, then `rows`.
    fn sheet(headers: &[&str], rows: &[Vec<Data>]) -> Range<Data> {
        let mut range = Range::new((0, 0), (0, 0));
        range.set_value((0, 0), Data::String("Maker wise registrations".into()));
        for (c, h) in headers.iter().enumerate() {
            range.set_value((4, c as u32), Data::String(h.to_string()));
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                range.set_value(((5 + r) as u32, c as u32), value.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    fn f(v: f64) -> Data {
        Data::Float(v)
    }

    /// Write a fixture workbook with the standard layout.
    pub(crate) fn write_workbook(path: &Path, headers: &[&str], rows: &[(&str, Vec<f64>)]) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Vehicle Registrations").unwrap();
        for (c, h) in headers.iter().enumerate() {
            worksheet.write_string(4, c as u16, *h).unwrap();
        }
        for (r, (maker, values)) in rows.iter().enumerate() {
            let row = (5 + r) as u32;
            worksheet.write_number(row, 0, (r + 1) as f64).unwrap();
            if !maker.is_empty() {
                worksheet.write_string(row, 1, *maker).unwrap();
            }
            for (c, v) in values.iter().enumerate() {
                worksheet.write_number(row, (2 + c) as u16, *v).unwrap();
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_classify_category() {
        assert_eq!(classify_category("two_wheeler.xlsx"), VehicleCategory::TwoWheeler);
        assert_eq!(classify_category("THREE WHEELER 2021.xlsx"), VehicleCategory::ThreeWheeler);
        assert_eq!(classify_category("Four-Wheeler.xlsx"), VehicleCategory::FourWheeler);
        assert_eq!(classify_category("tractors.xlsx"), VehicleCategory::Unknown);
        // "two" wins over later keywords
        assert_eq!(classify_category("two_and_four.xlsx"), VehicleCategory::TwoWheeler);
    }

    #[test]
    fn test_parse_basic_sheet() {
        let range = sheet(
            &["S No", "Maker", "JAN", "FEB", "MAR", "TOTAL"],
            &[
                vec![f(1.0), s("HERO MOTOCORP"), f(100.0), f(200.0), f(300.0), f(600.0)],
                vec![f(2.0), s("  BAJAJ AUTO "), f(10.0), f(20.0), f(30.0), f(60.0)],
            ],
        );
        let data = parse_sheet(&range, 2021, VehicleCategory::TwoWheeler, &ParseOptions::default()).unwrap();

        assert_eq!(data.months, vec![Month::Jan, Month::Feb, Month::Mar]);
        assert_eq!(data.records.len(), 2);
        assert_eq!(data.records[0].maker, "HERO MOTOCORP");
        assert_eq!(data.records[0].month(Month::Feb), Some(200.0));
        assert_eq!(data.records[0].month(Month::Apr), None);
        assert_eq!(data.records[1].maker, "BAJAJ AUTO");
        assert_eq!(data.records[1].year, 2021);
    }

    #[test]
    fn test_forward_fill_merges_maker_rows() {
        let range = sheet(
            &["S No", "Maker", "JAN", "FEB"],
            &[
                vec![f(1.0), s("TVS"), f(5.0), f(6.0)],
                vec![Data::Empty, Data::Empty, f(1.0), f(2.0)],
                vec![f(2.0), s("HONDA"), f(7.0), f(8.0)],
            ],
        );
        let data = parse_sheet(&range, 2022, VehicleCategory::TwoWheeler, &ParseOptions::default()).unwrap();

        assert_eq!(data.records.len(), 2);
        assert_eq!(data.records[0].monthly, vec![(Month::Jan, 6.0), (Month::Feb, 8.0)]);
        assert_eq!(data.records[1].maker, "HONDA");
    }

    #[test]
    fn test_non_numeric_values_count_as_zero() {
        let range = sheet(
            &["S No", "Maker", "JAN", "FEB", "MAR"],
            &[vec![f(1.0), s("MARUTI"), s("1,234"), s("n/a"), Data::Empty]],
        );
        let data = parse_sheet(&range, 2020, VehicleCategory::FourWheeler, &ParseOptions::default()).unwrap();

        assert_eq!(
            data.records[0].monthly,
            vec![(Month::Jan, 1234.0), (Month::Feb, 0.0), (Month::Mar, 0.0)]
        );
    }

    #[test]
    fn test_blank_rows_and_rows_before_first_maker_skipped() {
        let range = sheet(
            &["S No", "Maker", "JAN"],
            &[
                vec![Data::Empty, Data::Empty, f(9.0)],
                vec![f(1.0), s("ATUL"), f(3.0)],
                vec![Data::Empty, Data::Empty, Data::Empty],
            ],
        );
        let data = parse_sheet(&range, 2020, VehicleCategory::ThreeWheeler, &ParseOptions::default()).unwrap();

        assert_eq!(data.records.len(), 1);
        assert_eq!(data.records[0].monthly, vec![(Month::Jan, 3.0)]);
    }

    #[test]
    fn test_positional_headers_tolerated() {
        let range = sheet(
            &["S No", "Maker", "1", "2", "3", "4"],
            &[vec![f(1.0), s("X"), f(1.0), f(2.0), f(3.0), f(4.0)]],
        );
        let data = parse_sheet(&range, 2020, VehicleCategory::Unknown, &ParseOptions::default()).unwrap();
        assert_eq!(data.months, vec![Month::Jan, Month::Feb, Month::Mar, Month::Apr]);
    }

    #[test]
    fn test_too_many_month_columns() {
        let mut headers = vec!["S No", "Maker"];
        headers.extend(["c"; 13]);
        let range = sheet(&headers, &[]);
        let err = parse_sheet(&range, 2020, VehicleCategory::Unknown, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, WorkbookError::TooManyMonthColumns(13)));
    }

    #[test]
    fn test_out_of_order_month_columns() {
        let range = sheet(&["S No", "Maker", "JAN", "MAR", "FEB"], &[]);
        let err = parse_sheet(&range, 2020, VehicleCategory::Unknown, &ParseOptions::default()).unwrap_err();
        match err {
            WorkbookError::MonthOutOfOrder { header, position, expected } => {
                assert_eq!(header, "MAR");
                assert_eq!(position, 1);
                assert_eq!(expected, "Feb");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_header_row() {
        let mut range = Range::new((0, 0), (0, 0));
        range.set_value((2, 1), Data::String("title".into()));
        let err = parse_sheet(&range, 2020, VehicleCategory::Unknown, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, WorkbookError::MissingHeaderRow { row: 4, .. }));
    }

    #[test]
    fn test_read_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two_wheeler.xlsx");
        write_workbook(
            &path,
            &["S No", "Maker", "JAN", "FEB", "MAR", "TOTAL"],
            &[("X", vec![100.0, 200.0, 300.0, 600.0])],
        );

        let data = read_workbook(&path, 2021, VehicleCategory::TwoWheeler, &ParseOptions::default()).unwrap();
        assert_eq!(data.source, "two_wheeler.xlsx");
        assert_eq!(data.records[0].maker, "X");
        assert_eq!(data.records[0].monthly.len(), 3);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_workbook(
            &dir.path().join("nope.xlsx"),
            2021,
            VehicleCategory::Unknown,
            &ParseOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WorkbookError::Open { .. }));
    }
}
