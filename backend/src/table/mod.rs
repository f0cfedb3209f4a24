//! Master table persistence and the read-only in-memory table handle.
//!
//! The master table is a flat CSV with one row per
//! Category+Maker+Year+Quarter (plus `ALL_MAKERS` aggregate rows):
//!
//! ```text
//! Vehicle_Category,Maker,Year,Quarter,Registrations,YearQuarter,QoQ_Growth,YoY_Growth
//! Two Wheeler,X,2021,Q1,600.0,2021Q1,,
//! ```
//!
//! Null values are written as empty cells.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TableError, TableResult};
use crate::models::{year_quarter, QuarterlyRecord, VehicleCategory};

/// Column names, in file order.
pub const MASTER_COLUMNS: [&str; 8] = [
    "Vehicle_Category",
    "Maker",
    "Year",
    "Quarter",
    "Registrations",
    "YearQuarter",
    "QoQ_Growth",
    "YoY_Growth",
];

/// Write the master table.
///
/// Rows go to a temporary sibling file first, which is renamed over `path`
/// once fully written, so a failed write leaves any previous table intact.
pub fn write_master(path: &Path, rows: &[QuarterlyRecord]) -> TableResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path);
    let result = write_rows(&tmp_path, rows);
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
        return result;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

fn write_rows(path: &Path, rows: &[QuarterlyRecord]) -> TableResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(MASTER_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read the master table.
///
/// Maker values are stripped of surrounding quotes and whitespace, an empty
/// YearQuarter is recomputed, and non-finite numbers are read as null.
pub fn read_master(path: &Path) -> TableResult<Vec<QuarterlyRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let found: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut expected: Vec<String> = MASTER_COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut found_sorted = found.clone();
    expected.sort();
    found_sorted.sort();
    if expected != found_sorted {
        return Err(TableError::UnexpectedColumns {
            expected: MASTER_COLUMNS.iter().map(|c| c.to_string()).collect(),
            found,
        });
    }

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: QuarterlyRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| invalid_field(&record, &headers, e))?;
        row.maker = row.maker.trim().trim_matches('"').trim().to_string();
        if row.year_quarter.trim().is_empty() {
            row.year_quarter = year_quarter(row.year, row.quarter);
        }
        row.registrations = row.registrations.filter(|v| v.is_finite());
        row.qoq_growth = row.qoq_growth.filter(|v| v.is_finite());
        row.yoy_growth = row.yoy_growth.filter(|v| v.is_finite());
        rows.push(row);
    }

    Ok(rows)
}

/// Name the column of a value that failed to parse, when csv locates it.
fn invalid_field(record: &csv::StringRecord, headers: &csv::StringRecord, err: csv::Error) -> TableError {
    let index = match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.field(),
        _ => None,
    };
    let Some(index) = index.map(|i| i as usize) else {
        return err.into();
    };
    let name = headers.get(index).map(str::trim).unwrap_or_default();
    match MASTER_COLUMNS.iter().find(|c| **c == name) {
        Some(&field) => TableError::InvalidField {
            line: record.position().map(|p| p.line()).unwrap_or_default(),
            field,
            value: record.get(index).unwrap_or_default().to_string(),
        },
        None => err.into(),
    }
}

// =============================================================================
// MasterTable handle
// =============================================================================

/// Read-only in-memory master table.
///
/// Built once at process start and shared (behind an `Arc`) with every view
/// operation. There is no mutation API.
#[derive(Debug, Clone, Default)]
pub struct MasterTable {
    rows: Vec<QuarterlyRecord>,
    source: Option<PathBuf>,
}

impl MasterTable {
    /// Load the master table from disk.
    pub fn load(path: impl AsRef<Path>) -> TableResult<Self> {
        let path = path.as_ref();
        Ok(Self {
            rows: read_master(path)?,
            source: Some(path.to_path_buf()),
        })
    }

    /// Build a table from rows already in memory.
    pub fn from_rows(rows: Vec<QuarterlyRecord>) -> Self {
        Self { rows, source: None }
    }

    pub fn rows(&self) -> &[QuarterlyRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// File the table was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Categories in first-seen order.
    pub fn categories(&self) -> Vec<VehicleCategory> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.vehicle_category) {
                seen.push(row.vehicle_category);
            }
        }
        seen
    }

    /// Sorted, de-duplicated makers of a category (including `ALL_MAKERS`).
    pub fn makers(&self, category: VehicleCategory) -> Vec<String> {
        self.rows
            .iter()
            .filter(|r| r.vehicle_category == category)
            .map(|r| r.maker.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted, de-duplicated years across the whole table.
    pub fn years(&self) -> Vec<i32> {
        self.rows
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
