//! # Regtrack - quarterly vehicle registration trends
//!
//! Regtrack ingests yearly per-category workbook exports of monthly vehicle
//! registrations, reshapes them into one quarterly table with growth metrics
//! and serves filterable chart data to a dashboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ year/*.xlsx │────▶│   Parser    │────▶│  Transform  │────▶│ master CSV  │
//! │  (monthly)  │     │ (calamine)  │     │ (Q/QoQ/YoY) │     │ (long form) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │
//!                     ┌─────────────┐     ┌─────────────┐            │
//!                     │  Frontend   │◀────│  Dashboard  │◀───────────┘
//!                     │  (Plotly)   │     │ (axum API)  │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use regtrack::{run_ingest, single_view, IngestOptions, MasterTable, SingleQuery, VehicleCategory};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     run_ingest(&IngestOptions::new("data", "master_Data.csv"))?;
//!
//!     let table = MasterTable::load("master_Data.csv")?;
//!     let view = single_view(&table, &SingleQuery {
//!         category: VehicleCategory::FourWheeler,
//!         maker: None,
//!         year_from: None,
//!         year_to: None,
//!         include_raw: false,
//!     });
//!     println!("{}", view.caption);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (VehicleCategory, Quarter, QuarterlyRecord)
//! - [`parser`] - Workbook reading and category inference
//! - [`transform`] - Quarterly reshape, growth, aggregation and pipeline
//! - [`table`] - Master table persistence
//! - [`dashboard`] - Filter and chart view model
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Ingestion
pub mod parser;
pub mod table;
pub mod transform;

// Presentation
pub mod dashboard;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{PipelineError, ServerError, TableError, WorkbookError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Month, Quarter, QuarterlyRecord, RawRecord, VehicleCategory, ALL_MAKERS};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{classify_category, read_workbook, ParseOptions, WorkbookData};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use table::{read_master, write_master, MasterTable};
pub use transform::{
    aggregate_all_makers, apply_growth, build_master, discover_workbooks, pct_change, run_ingest, to_quarterly,
    IngestOptions, IngestReport, WorkbookSource,
};

// =============================================================================
// Re-exports - Dashboard
// =============================================================================

pub use dashboard::{
    comparison_view, filter_options, filter_rows, single_view, ComparisonQuery, ComparisonView, DashboardMode,
    FilterOptions, RowFilter, SingleQuery, SingleView,
};

pub use config::AppConfig;

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
