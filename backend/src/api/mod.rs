//! HTTP API module.
//!
//! Dashboard endpoints, the response envelope and the activity log stream.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{router, start_server};
pub use types::*;
