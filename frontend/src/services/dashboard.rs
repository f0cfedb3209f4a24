//! HTTP service for the dashboard endpoints.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{
    AppError, AppResult, ComparisonQuery, ComparisonView, FilterOptions, SingleQuery, SingleView, ViewResponse,
};

/// URL of the options endpoint, with the category query-encoded.
pub fn options_url(backend_url: &str, category: Option<&str>) -> String {
    match category {
        Some(category) => format!(
            "{}/api/options?category={}",
            backend_url,
            String::from(js_sys::encode_uri_component(category))
        ),
        None => format!("{}/api/options", backend_url),
    }
}

/// Fetch sidebar choices for a category (the first category when `None`).
pub async fn fetch_options(backend_url: &str, category: Option<&str>) -> AppResult<FilterOptions> {
    let response = Request::get(&options_url(backend_url, category))
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    decode(response).await
}

/// Request the single-maker view.
pub async fn fetch_single_view(backend_url: &str, query: &SingleQuery) -> AppResult<ViewResponse<SingleView>> {
    post(&format!("{}/api/views/single", backend_url), query).await
}

/// Request the comparison view.
pub async fn fetch_comparison_view(
    backend_url: &str,
    query: &ComparisonQuery,
) -> AppResult<ViewResponse<ComparisonView>> {
    post(&format!("{}/api/views/comparison", backend_url), query).await
}

/// Row count reported by `/health`.
pub async fn fetch_row_count(backend_url: &str) -> AppResult<usize> {
    let response = Request::get(&format!("{}/health", backend_url))
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    let body: Value = decode(response).await?;
    body.get("rows")
        .and_then(Value::as_u64)
        .map(|n| n as usize)
        .ok_or_else(|| AppError::Decode("missing row count".to_string()))
}

async fn post<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> AppResult<T> {
    let response = Request::post(url)
        .json(body)
        .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(AppError::Server {
            status,
            message: error_message(&text),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Extract `error` from a backend error body, or return the text as-is.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        })
}
