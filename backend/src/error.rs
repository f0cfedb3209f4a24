//! Error types for the regtrack ingestion pipeline and dashboard server.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`WorkbookError`] - Workbook reading and sheet structure errors
//! - [`TableError`] - Master table persistence errors
//! - [`PipelineError`] - Top-level ingestion errors
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Workbook Errors
// =============================================================================

/// Errors while reading a single workbook.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// The file could not be opened as a workbook.
    #[error("Failed to open workbook {path}: {message}")]
    Open { path: PathBuf, message: String },

    /// The workbook has no worksheet.
    #[error("Workbook {0} has no sheets")]
    NoSheet(PathBuf),

    /// The first worksheet could not be read.
    #[error("Failed to read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    /// The sheet ends before the header row.
    #[error("Header row {row} not found (sheet has {available} rows)")]
    MissingHeaderRow { row: usize, available: usize },

    /// The header row has no Maker column.
    #[error("Header row has no maker column (found {0} columns)")]
    NoMakerColumn(usize),

    /// More month columns than months in a year.
    #[error("Found {0} month columns, at most 12 are allowed")]
    TooManyMonthColumns(usize),

    /// A month header at the wrong position.
    #[error("Month column '{header}' at position {position} is out of order (expected {expected})")]
    MonthOutOfOrder {
        header: String,
        position: usize,
        expected: String,
    },
}

// =============================================================================
// Table Errors
// =============================================================================

/// Errors while reading or writing the master table.
#[derive(Debug, Error)]
pub enum TableError {
    /// IO error.
    #[error("Table IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error.
    #[error("Table CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field that does not hold a valid value.
    #[error("Line {line}: invalid {field} '{value}'")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },

    /// Header row does not match the expected column set.
    #[error("Unexpected columns: expected {expected:?}, found {found:?}")]
    UnexpectedColumns {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level ingestion errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run_ingest`].
/// Any variant aborts the run before the master table is replaced.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Workbook error, with the offending file.
    #[error("{path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: WorkbookError,
    },

    /// Table error.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Base directory missing or not a directory.
    #[error("Input directory not found: {0}")]
    InvalidBaseDir(PathBuf),

    /// No workbook found under the base directory.
    #[error("No .xlsx workbooks found under {0}")]
    NoWorkbooks(PathBuf),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Master table could not be loaded.
    #[error("Failed to load master table: {0}")]
    Table(#[from] TableError),

    /// Socket or serve error.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for workbook operations.
pub type WorkbookResult<T> = Result<T, WorkbookError>;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
