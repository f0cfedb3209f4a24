//! High-level ingestion API: workbook tree to master table.
//!
//! This module combines all steps: discovery, parsing, quarterly reshape,
//! growth, aggregation and persistence.
//!
//! # Example
//!
//! ```rust,ignore
//! use regtrack::transform::{run_ingest, IngestOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run_ingest(&IngestOptions::new("data", "master_Data.csv"))?;
//!     println!("Wrote {} rows", report.maker_rows + report.aggregate_rows);
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::aggregate::aggregate_all_makers;
use super::growth::apply_growth;
use super::quarterly::to_quarterly;
use crate::api::logs::{log_error, log_info, log_info_indent, log_success, log_success_indent, log_warning};
use crate::error::{PipelineError, PipelineResult};
use crate::models::{QuarterlyRecord, RawRecord, VehicleCategory};
use crate::parser::{classify_category, read_workbook, ParseOptions, WorkbookData};
use crate::table::write_master;

/// Number of rows kept in [`IngestReport::preview`].
pub const PREVIEW_ROWS: usize = 12;

/// Options for an ingestion run
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Root directory holding one sub-directory per year
    pub base_dir: PathBuf,

    /// Master table path
    pub output: PathBuf,

    /// Sheet layout
    pub parse: ParseOptions,
}

impl IngestOptions {
    pub fn new(base_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            output: output.into(),
            parse: ParseOptions::default(),
        }
    }
}

/// A workbook found under the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookSource {
    pub path: PathBuf,
    pub year: i32,
    pub category: VehicleCategory,
}

/// Per-file summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub path: String,
    pub category: VehicleCategory,
    pub year: i32,
    pub makers: usize,
    pub months: Vec<String>,
}

/// Result of a complete ingestion run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Workbooks processed, in discovery order
    pub files: Vec<FileSummary>,

    /// Number of per-maker rows
    pub maker_rows: usize,

    /// Number of `ALL_MAKERS` rows
    pub aggregate_rows: usize,

    /// Where the master table was written
    pub output: PathBuf,

    /// RFC 3339 generation time
    pub generated_at: String,

    /// First rows of the master table
    pub preview: Vec<QuarterlyRecord>,
}

/// Master table content, split by row kind.
#[derive(Debug, Clone, Default)]
pub struct MasterRows {
    pub makers: Vec<QuarterlyRecord>,
    pub aggregates: Vec<QuarterlyRecord>,
}

impl MasterRows {
    /// Per-maker rows followed by aggregate rows.
    pub fn into_rows(self) -> Vec<QuarterlyRecord> {
        let mut rows = self.makers;
        rows.extend(self.aggregates);
        rows
    }
}

/// Year of a `YYYY` directory name.
fn year_dir(name: &str) -> Option<i32> {
    if name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit()) {
        name.parse().ok()
    } else {
        None
    }
}

/// Find workbooks under `base`: `<base>/<YYYY>/*.xlsx`, years and files
/// sorted. Office lock files (`~$...`) are ignored.
pub fn discover_workbooks(base: &Path) -> PipelineResult<Vec<WorkbookSource>> {
    if !base.is_dir() {
        return Err(PipelineError::InvalidBaseDir(base.to_path_buf()));
    }

    let mut years: Vec<(i32, PathBuf)> = Vec::new();
    for entry in fs::read_dir(base)? {
        let path = entry?.path();
        let name = file_name(&path);
        let year = if path.is_dir() { year_dir(&name) } else { None };
        match year {
            Some(year) => years.push((year, path)),
            None => log_warning(format!("Skipping {} (not a year directory)", name)),
        }
    }
    years.sort();

    let mut sources = Vec::new();
    for (year, dir) in years {
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let name = file_name(&path);
            let is_xlsx = path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
            if path.is_file() && is_xlsx && !name.starts_with("~$") {
                files.push(path);
            }
        }
        files.sort();

        sources.extend(files.into_iter().map(|path| WorkbookSource {
            category: classify_category(&file_name(&path)),
            path,
            year,
        }));
    }

    Ok(sources)
}

/// Reshape, derive growth and aggregate parsed workbooks.
pub fn build_master(workbooks: &[WorkbookData]) -> MasterRows {
    let records: Vec<RawRecord> = workbooks
        .iter()
        .flat_map(|w| w.records.iter().cloned())
        .collect();

    let mut makers = to_quarterly(&records);
    apply_growth(&mut makers);
    let aggregates = aggregate_all_makers(&makers);

    MasterRows { makers, aggregates }
}

/// Run a full ingestion and write the master table.
///
/// Any unreadable workbook aborts the run; the previous master table is
/// left untouched in that case.
pub fn run_ingest(options: &IngestOptions) -> PipelineResult<IngestReport> {
    log_info(format!("📂 Scanning {}...", options.base_dir.display()));
    let sources = discover_workbooks(&options.base_dir)?;
    if sources.is_empty() {
        return Err(PipelineError::NoWorkbooks(options.base_dir.clone()));
    }
    log_success(format!("Found {} workbook(s)", sources.len()));

    log_info("📖 Reading workbooks...");
    let mut workbooks = Vec::with_capacity(sources.len());
    for source in &sources {
        let data = read_workbook(&source.path, source.year, source.category, &options.parse).map_err(|e| {
            log_error(format!("{}: {}", source.path.display(), e));
            PipelineError::Workbook {
                path: source.path.clone(),
                source: e,
            }
        })?;
        if source.category == VehicleCategory::Unknown {
            log_warning(format!("{}: no category keyword in file name", data.source));
        }
        log_success_indent(
            format!(
                "{} {} ({}): {} makers, {} months",
                source.year,
                data.source,
                source.category,
                data.records.len(),
                data.months.len()
            ),
            1,
        );
        workbooks.push(data);
    }

    log_info("🔄 Building quarterly table...");
    let master = build_master(&workbooks);
    log_info_indent(format!("{} maker rows", master.makers.len()), 1);
    log_info_indent(format!("{} aggregate rows", master.aggregates.len()), 1);

    let files = workbooks
        .iter()
        .zip(&sources)
        .map(|(data, source)| FileSummary {
            path: source.path.display().to_string(),
            category: data.category,
            year: data.year,
            makers: data.records.len(),
            months: data.months.iter().map(|m| m.label().to_string()).collect(),
        })
        .collect();
    let (maker_rows, aggregate_rows) = (master.makers.len(), master.aggregates.len());
    let rows = master.into_rows();

    log_info(format!("💾 Writing {}...", options.output.display()));
    write_master(&options.output, &rows)?;
    log_success(format!("Master table saved ({} rows)", rows.len()));

    Ok(IngestReport {
        files,
        maker_rows,
        aggregate_rows,
        output: options.output.clone(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        preview: rows.into_iter().take(PREVIEW_ROWS).collect(),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::logs::{LogLevel, LOG_BROADCASTER};
    use crate::error::WorkbookError;
    use tokio::sync::broadcast;
    use crate::models::{Quarter, ALL_MAKERS};
    use crate::parser::tests::write_workbook;
    use crate::table::read_master;

    const HEADERS: [&str; 14] = [
        "S No", "Maker", "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    fn months(base: f64) -> Vec<f64> {
        (1..=12).map(|m| base * m as f64).collect()
    }

    fn fixture_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for year in ["2020", "2021"] {
            fs::create_dir(dir.path().join(year)).unwrap();
        }
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("readme.txt"), "x").unwrap();

        write_workbook(
            &dir.path().join("2020/Two_Wheeler.xlsx"),
            &HEADERS,
            &[("HERO", months(10.0)), ("BAJAJ", months(1.0))],
        );
        write_workbook(
            &dir.path().join("2021/Two_Wheeler.xlsx"),
            &HEADERS,
            &[("HERO", months(20.0)), ("BAJAJ", months(1.0))],
        );
        write_workbook(
            &dir.path().join("2021/four wheeler.xlsx"),
            &HEADERS[..5],
            &[("MARUTI", vec![100.0, 200.0, 300.0])],
        );
        fs::write(dir.path().join("2021/~$Two_Wheeler.xlsx"), "lock").unwrap();
        dir
    }

    #[test]
    fn test_discover_sorted_and_classified() {
        let dir = fixture_tree();
        let sources = discover_workbooks(dir.path()).unwrap();

        let found: Vec<(i32, VehicleCategory)> = sources.iter().map(|s| (s.year, s.category)).collect();
        assert_eq!(
            found,
            vec![
                (2020, VehicleCategory::TwoWheeler),
                (2021, VehicleCategory::TwoWheeler),
                (2021, VehicleCategory::FourWheeler),
            ]
        );
    }

    #[test]
    fn test_year_dir_names() {
        assert_eq!(year_dir("2021"), Some(2021));
        assert_eq!(year_dir("202"), None);
        assert_eq!(year_dir("2021a"), None);
        assert_eq!(year_dir("+202"), None);
        assert_eq!(year_dir("notes"), None);
    }

    #[test]
    fn test_discover_missing_base() {
        let err = discover_workbooks(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidBaseDir(_)));
    }

    #[test]
    fn test_run_ingest_end_to_end() {
        let dir = fixture_tree();
        let output = dir.path().join("out/master_Data.csv");
        let report = run_ingest(&IngestOptions::new(dir.path(), &output)).unwrap();

        assert_eq!(report.files.len(), 3);
        // 2 makers x 2 years x 4 quarters + 1 maker x 1 year x 4 quarters
        assert_eq!(report.maker_rows, 20);
        // (Two Wheeler x 2 years + Four Wheeler x 1 year) x 4 quarters
        assert_eq!(report.aggregate_rows, 12);
        assert_eq!(report.preview.len(), PREVIEW_ROWS);

        let rows = read_master(&output).unwrap();
        assert_eq!(rows.len(), 32);
        assert!(rows[..20].iter().all(|r| !r.is_aggregate()));
        assert!(rows[20..].iter().all(|r| r.is_aggregate()));

        let maruti_q1 = rows
            .iter()
            .find(|r| r.maker == "MARUTI" && r.quarter == Quarter::Q1)
            .unwrap();
        assert_eq!(maruti_q1.registrations, Some(600.0));
        let maruti_q2 = rows
            .iter()
            .find(|r| r.maker == "MARUTI" && r.quarter == Quarter::Q2)
            .unwrap();
        assert_eq!(maruti_q2.registrations, None);

        // HERO doubles year over year
        let hero_2021_q3 = rows
            .iter()
            .find(|r| r.maker == "HERO" && r.year == 2021 && r.quarter == Quarter::Q3)
            .unwrap();
        assert_eq!(hero_2021_q3.yoy_growth, Some(100.0));

        let two_agg = rows
            .iter()
            .find(|r| {
                r.maker == ALL_MAKERS && r.vehicle_category == VehicleCategory::TwoWheeler && r.year == 2020
                    && r.quarter == Quarter::Q1
            })
            .unwrap();
        assert_eq!(two_agg.registrations, Some(60.0 + 6.0));
    }

    #[test]
    fn test_empty_base_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("2021")).unwrap();
        let output = dir.path().join("master.csv");

        let err = run_ingest(&IngestOptions::new(dir.path(), &output)).unwrap_err();
        assert!(matches!(err, PipelineError::NoWorkbooks(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_bad_workbook_aborts_without_output() {
        let dir = fixture_tree();
        fs::write(dir.path().join("2021/three_wheeler.xlsx"), "not a zip").unwrap();
        let output = dir.path().join("master.csv");
        fs::write(&output, "previous").unwrap();

        let mut logs = LOG_BROADCASTER.subscribe();
        let err = run_ingest(&IngestOptions::new(dir.path(), &output)).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Workbook {
                source: WorkbookError::Open { .. },
                ..
            }
        ));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");

        let mut logged = false;
        loop {
            match logs.try_recv() {
                Ok(entry) => {
                    if entry.level == LogLevel::Error && entry.message.contains("three_wheeler.xlsx") {
                        logged = true;
                        break;
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        assert!(logged);
    }

    #[test]
    fn test_build_master_orders_makers_first() {
        let data = WorkbookData {
            source: "t.xlsx".into(),
            year: 2022,
            category: VehicleCategory::ThreeWheeler,
            months: vec![],
            records: vec![],
        };
        let master = build_master(&[data]);
        assert!(master.makers.is_empty());
        assert!(master.into_rows().is_empty());
    }
}
