//! UI Components for the registration dashboard.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with the row count badge
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`Sidebar`] - Mode, category, maker and year filters
//! - [`SingleSection`] / [`ComparisonSection`] - View results
//! - [`ChartPanelView`] - Plotly chart or its warning
//! - [`RawTable`] - Raw rows of the single view
//! - [`LogsPanel`] - Real-time backend activity (SSE)

mod header;
mod hero;
mod footer;
mod sidebar;
mod charts;
mod raw_table;
mod views;
mod logs;

pub use header::*;
pub use hero::*;
pub use footer::*;
pub use sidebar::*;
pub use charts::*;
pub use raw_table::*;
pub use views::*;
pub use logs::*;
