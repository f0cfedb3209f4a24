//! Runtime configuration from the environment.
//!
//! | Variable               | Default           |
//! |------------------------|-------------------|
//! | `REGTRACK_DATA_DIR`    | `data`            |
//! | `REGTRACK_MASTER_FILE` | `master_Data.csv` |
//! | `REGTRACK_HEADER_ROW`  | `4`               |
//! | `REGTRACK_PORT`        | `3000`            |
//! | `REGTRACK_STATIC_DIR`  | unset             |
//!
//! Values that fail to parse fall back to the default with a warning.
//! Command-line flags override all of these.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::api::logs::log_warning;
use crate::parser::DEFAULT_HEADER_ROW;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MASTER_FILE: &str = "master_Data.csv";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of the `<year>/<category>.xlsx` tree
    pub data_dir: PathBuf,
    /// Master table written by ingestion and read by the server
    pub master_file: PathBuf,
    /// Absolute header row index in every workbook
    pub header_row: usize,
    pub port: u16,
    /// Built frontend served at `/`
    pub static_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            master_file: PathBuf::from(DEFAULT_MASTER_FILE),
            header_row: DEFAULT_HEADER_ROW,
            port: DEFAULT_PORT,
            static_dir: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            data_dir: value("REGTRACK_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            master_file: value("REGTRACK_MASTER_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.master_file),
            header_row: parsed("REGTRACK_HEADER_ROW", value("REGTRACK_HEADER_ROW"), defaults.header_row),
            port: parsed("REGTRACK_PORT", value("REGTRACK_PORT"), defaults.port),
            static_dir: value("REGTRACK_STATIC_DIR").map(PathBuf::from),
        }
    }
}

fn parsed<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log_warning(format!("Invalid {}={:?}, using {}", key, raw, default));
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), AppConfig::default());
        assert_eq!(AppConfig::default().master_file, PathBuf::from("master_Data.csv"));
        assert_eq!(AppConfig::default().header_row, 4);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("REGTRACK_DATA_DIR", "/srv/vahan"),
            ("REGTRACK_PORT", "8080"),
            ("REGTRACK_HEADER_ROW", " 2 "),
            ("REGTRACK_STATIC_DIR", "dist"),
        ]);
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/vahan"));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.header_row, 2);
        assert_eq!(cfg.static_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = config(&[("REGTRACK_PORT", "http"), ("REGTRACK_STATIC_DIR", "  ")]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.static_dir, None);
    }
}
