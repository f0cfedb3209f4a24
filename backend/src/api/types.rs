//! REST API types for the dashboard frontend.
//!
//! View bodies are the dashboard view models serialized as-is; the
//! envelope only adds a request id and a status.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::dashboard::{ChartPanel, ComparisonView, DashboardMode, SingleView};

/// Envelope around every view returned to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse<T> {
    /// Unique request identifier
    pub request_id: String,

    /// "ready" when every panel has data, "warning" otherwise
    pub status: String,

    /// Mode the view was built for
    pub mode: DashboardMode,

    pub view: T,
}

impl<T> ViewResponse<T> {
    fn with_status(view: T, mode: DashboardMode, complete: bool) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            status: if complete { "ready" } else { "warning" }.to_string(),
            mode,
            view,
        }
    }
}

impl From<SingleView> for ViewResponse<SingleView> {
    fn from(view: SingleView) -> Self {
        let complete = view.panels.iter().all(ChartPanel::is_chart);
        Self::with_status(view, DashboardMode::Single, complete)
    }
}

impl From<ComparisonView> for ViewResponse<ComparisonView> {
    fn from(view: ComparisonView) -> Self {
        let complete = view.notices.is_empty()
            && view
                .makers
                .iter()
                .all(|m| m.panels.iter().all(ChartPanel::is_chart));
        Self::with_status(view, DashboardMode::Comparison, complete)
    }
}

/// Create an error response body
pub fn error_response(error: &str) -> Value {
    json!({
        "requestId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{comparison_view, single_view, ComparisonQuery, SingleQuery};
    use crate::dashboard::tests::sample_table;
    use crate::models::VehicleCategory;

    #[test]
    fn test_single_status() {
        let table = sample_table();
        let query = SingleQuery {
            category: VehicleCategory::FourWheeler,
            maker: None,
            year_from: Some(2020),
            year_to: None,
            include_raw: false,
        };
        let response = ViewResponse::from(single_view(&table, &query));
        assert_eq!(response.status, "ready");
        assert!(Uuid::parse_str(&response.request_id).is_ok());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["requestId"].is_string());
        assert_eq!(json["mode"], "single");
        assert_eq!(json["view"]["panels"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_comparison_status_warning() {
        let table = sample_table();
        let query = ComparisonQuery {
            category: VehicleCategory::FourWheeler,
            makers: vec![],
            year_from: None,
            year_to: None,
        };
        let response = ViewResponse::from(comparison_view(&table, &query));
        assert_eq!(response.status, "warning");
        assert_eq!(response.mode, DashboardMode::Comparison);
    }

    #[test]
    fn test_error_response() {
        let body = error_response("Master table not loaded");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "Master table not loaded");
    }
}
