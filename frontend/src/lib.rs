//! Regtrack - Frontend Rust/Leptos Application
//!
//! A WebAssembly dashboard over the regtrack master table: quarterly
//! vehicle registrations per manufacturer with QoQ and YoY growth.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (row count badge)                                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Dashboard                                                   │
//! │  ├── Sidebar (mode, category, makers, years)                │
//! │  ├── SingleSection or ComparisonSection                     │
//! │  └── LogsPanel                                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - API mirrors (FilterOptions, SingleView, LogEntry, etc.)
//! - [`components`] - UI components (Sidebar, charts, views, etc.)
//! - [`services`] - Backend communication and Plotly rendering

use leptos::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Filters
    DashboardMode, FilterOptions, RowFilter, SingleQuery, ComparisonQuery,
    // Charts
    ChartKind, ChartPanel, ChartPoint, ChartSeries,
    // Views
    QuarterlyRow, SingleView, ComparisonView, MakerPanels, Notice, NoticeLevel, ViewResponse,
    // Logs
    LogEntry, LogLevel,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Regtrack - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=Dashboard/>
                </Routes>
            </main>
        </Router>
    }
}

/// What the result area currently shows.
#[derive(Clone)]
enum ViewState {
    Prompt,
    Single(SingleView),
    Comparison(ComparisonView),
    Failed(String),
}

#[component]
fn Dashboard() -> impl IntoView {
    let state = FilterState::new();
    let (result, set_result) = create_signal(ViewState::Prompt);
    let (loading, set_loading) = create_signal(false);
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    // Initialize SSE connection ONCE at app startup
    init_sse_logs(set_logs);

    let options = create_local_resource(
        move || state.category.get(),
        |category| async move { fetch_options(BACKEND_URL, category.as_deref()).await },
    );

    create_effect(move |_| match options.get() {
        Some(Ok(opts)) => state.apply_options(opts),
        Some(Err(e)) => {
            log::error!("Failed to load filter options: {}", e);
            set_result.set(ViewState::Failed(e.to_string()));
        }
        None => {}
    });

    // A mode switch drops the previous result
    create_effect(move |_| {
        let _ = state.mode.get();
        set_result.set(ViewState::Prompt);
    });

    let on_trigger = Callback::new(move |_: ()| match state.mode.get_untracked() {
        DashboardMode::Single => {
            let Some(query) = state.single_query() else { return };
            set_loading.set(true);
            spawn_local(async move {
                match fetch_single_view(BACKEND_URL, &query).await {
                    Ok(response) if response.mode != state.mode.get_untracked() => {
                        log::debug!("Dropping stale {:?} view", response.mode);
                    }
                    Ok(response) => set_result.set(ViewState::Single(response.view)),
                    Err(e) => set_result.set(ViewState::Failed(e.to_string())),
                }
                set_loading.set(false);
            });
        }
        DashboardMode::Comparison => {
            let Some(query) = state.comparison_query() else { return };
            set_loading.set(true);
            spawn_local(async move {
                match fetch_comparison_view(BACKEND_URL, &query).await {
                    Ok(response) if response.mode != state.mode.get_untracked() => {
                        log::debug!("Dropping stale {:?} view", response.mode);
                    }
                    Ok(response) => set_result.set(ViewState::Comparison(response.view)),
                    Err(e) => set_result.set(ViewState::Failed(e.to_string())),
                }
                set_loading.set(false);
            });
        }
    });

    view! {
        <Header/>

        <div class="container">
            <Hero/>

            <div class="dashboard">
                <Sidebar state=state loading=loading on_trigger=on_trigger/>

                <div class="dashboard-main">
                    {move || match result.get() {
                        ViewState::Prompt => {
                            view! { <PromptNotice message=state.mode.get().prompt()/> }.into_view()
                        }
                        ViewState::Single(data) => view! { <SingleSection data=data/> }.into_view(),
                        ViewState::Comparison(data) => view! { <ComparisonSection data=data/> }.into_view(),
                        ViewState::Failed(message) => {
                            view! { <NoticeBox level=NoticeLevel::Warning message=message/> }.into_view()
                        }
                    }}
                </div>
            </div>

            <LogsPanel logs=logs set_logs=set_logs/>
        </div>

        <Footer/>
    }
}
