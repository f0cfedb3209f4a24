//! HTTP server for the dashboard API.
//!
//! The master table is loaded once at start-up and shared read-only with
//! every handler. Each view request recomputes the full view.
//!
//! # API Endpoints
//!
//! | Method | Path                    | Description                      |
//! |--------|-------------------------|----------------------------------|
//! | GET    | `/health`               | Health check                     |
//! | GET    | `/api/options`          | Filter choices for a category    |
//! | POST   | `/api/views/single`     | Single-maker view                |
//! | POST   | `/api/views/comparison` | Comparison view (up to 5 makers) |
//! | GET    | `/api/logs`             | SSE stream of activity logs      |

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::logs::{log_info, log_success, log_warning, LOG_BROADCASTER};
use super::types::{error_response, ViewResponse};
use crate::config::AppConfig;
use crate::dashboard::{
    comparison_view, filter_options, single_view, ComparisonQuery, ComparisonView, FilterOptions, SingleQuery,
    SingleView,
};
use crate::error::ServerResult;
use crate::models::VehicleCategory;
use crate::table::MasterTable;

type SharedTable = Arc<MasterTable>;
type ApiError = (StatusCode, Json<Value>);

/// Build the API router over a loaded table.
///
/// When `static_dir` is given, unmatched paths are served from it.
pub fn router(table: SharedTable, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api/options", get(options))
        .route("/api/views/single", post(single))
        .route("/api/views/comparison", post(comparison))
        .route("/api/logs", get(sse_logs));
    if static_dir.is_none() {
        app = app.route("/", get(health));
    }
    let app = app.with_state(table);

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(cors)
}

/// Load the master table and serve until the process stops.
pub async fn start_server(config: &AppConfig) -> ServerResult<()> {
    log_info(format!("📖 Loading master table {}...", config.master_file.display()));
    let table = MasterTable::load(&config.master_file)?;
    log_success(format!(
        "{}: {} rows, {} categories, years {:?}",
        table.source().unwrap_or(config.master_file.as_path()).display(),
        table.len(),
        table.categories().len(),
        table.years()
    ));
    if table.is_empty() {
        log_warning("Master table is empty; views will show no data");
    }

    let app = router(Arc::new(table), config.static_dir.as_deref());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    println!("🚀 Regtrack dashboard running on http://localhost:{}", config.port);
    println!("   GET  /api/options           - Filter choices");
    println!("   POST /api/views/single      - Single manufacturer view");
    println!("   POST /api/views/comparison  - Manufacturer comparison");
    println!("   GET  /api/logs              - SSE log stream");
    println!("   GET  /health                - Health check");
    if let Some(dir) = &config.static_dir {
        println!("   GET  /*                     - {}", dir.display());
    }
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(table): State<SharedTable>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "regtrack",
        "version": env!("CARGO_PKG_VERSION"),
        "rows": table.len(),
        "endpoints": {
            "options": "GET /api/options?category=",
            "single": "POST /api/views/single",
            "comparison": "POST /api/views/comparison",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

#[derive(Debug, Deserialize)]
struct OptionsParams {
    category: Option<String>,
}

/// Filter options endpoint
async fn options(
    State(table): State<SharedTable>,
    Query(params): Query<OptionsParams>,
) -> Result<Json<FilterOptions>, ApiError> {
    let category = match params.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        None => None,
        Some(label) => Some(VehicleCategory::from_label(label).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(error_response(&format!("Unknown vehicle category: {}", label))),
            )
        })?),
    };
    Ok(Json(filter_options(&table, category)))
}

/// Single-maker view endpoint
async fn single(
    State(table): State<SharedTable>,
    body: Result<Json<SingleQuery>, JsonRejection>,
) -> Result<Json<ViewResponse<SingleView>>, ApiError> {
    let Json(query) = body.map_err(rejection)?;
    log_info(format!(
        "🔍 Single view: {} / {}",
        query.category,
        query.maker.as_deref().unwrap_or("(default)")
    ));
    Ok(Json(ViewResponse::from(single_view(&table, &query))))
}

/// Comparison view endpoint
async fn comparison(
    State(table): State<SharedTable>,
    body: Result<Json<ComparisonQuery>, JsonRejection>,
) -> Result<Json<ViewResponse<ComparisonView>>, ApiError> {
    let Json(query) = body.map_err(rejection)?;
    log_info(format!(
        "📊 Comparison: {} [{}]",
        query.category,
        query.makers.join(", ")
    ));
    Ok(Json(ViewResponse::from(comparison_view(&table, &query))))
}

fn rejection(err: JsonRejection) -> ApiError {
    log_warning(format!("Rejected request body: {}", err.body_text()));
    (err.status(), Json(error_response(&err.body_text())))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        // Lagged receivers skip the dropped entries
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
