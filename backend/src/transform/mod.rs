//! Transformation module.
//!
//! This module turns parsed workbooks into the master table:
//! - Quarterly: monthly counts to long-form quarterly rows
//! - Growth: QoQ / YoY percent change within a maker series
//! - Aggregate: per-category `ALL_MAKERS` rows
//! - Pipeline: directory walk, orchestration and persistence

pub mod aggregate;
pub mod growth;
pub mod pipeline;
pub mod quarterly;

pub use aggregate::aggregate_all_makers;
pub use growth::{apply_growth, pct_change};
pub use pipeline::*;
pub use quarterly::to_quarterly;
