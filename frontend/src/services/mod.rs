//! Backend and chart services.
//!
//! # Services
//!
//! - [`dashboard`] - Filter options and view requests to the regtrack backend
//! - [`charts`] - Plotly rendering of chart panels
//!
//! # JavaScript Bindings
//!
//! `charts` binds `Plotly.newPlot` from the global `Plotly` object that
//! `index.html` loads.

pub mod charts;
pub mod dashboard;

pub use charts::*;
pub use dashboard::*;
