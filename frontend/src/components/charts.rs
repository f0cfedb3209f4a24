//! Chart panels and notice boxes.

use leptos::*;

use crate::{render_chart, ChartPanel, ChartSeries, NoticeLevel};

/// Coloured message box for info and warning notices.
#[component]
pub fn NoticeBox(level: NoticeLevel, #[prop(into)] message: String) -> impl IntoView {
    let (class, icon) = match level {
        NoticeLevel::Info => ("notice notice-info", "ℹ️"),
        NoticeLevel::Warning => ("notice notice-warning", "⚠️"),
    };
    view! {
        <div class=class>
            <span class="notice-icon">{icon}</span>
            <span>{message}</span>
        </div>
    }
}

/// Plotly chart, drawn once the element is mounted.
#[component]
pub fn ChartView(series: ChartSeries, height: u32) -> impl IntoView {
    let chart_ref = create_node_ref::<leptos::html::Div>();
    let (error, set_error) = create_signal(None::<String>);
    let summary = series.summary.clone();

    chart_ref.on_load(move |el| {
        request_animation_frame(move || {
            spawn_local(async move {
                if let Err(e) = render_chart(&el, &series, height).await {
                    log::error!("Chart rendering failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            });
        });
    });

    view! {
        <div class="chart-panel">
            <div class="chart" node_ref=chart_ref></div>
            {move || error.get().map(|message| view! { <NoticeBox level=NoticeLevel::Warning message=message/> })}
            {summary.map(|s| view! { <p class="chart-summary">{s}</p> })}
        </div>
    }
}

/// Chart or the warning replacing it.
#[component]
pub fn ChartPanelView(panel: ChartPanel, height: u32) -> impl IntoView {
    match panel {
        ChartPanel::Chart(series) => view! { <ChartView series=series height=height/> }.into_view(),
        ChartPanel::Warning { message } => {
            view! { <NoticeBox level=NoticeLevel::Warning message=message/> }.into_view()
        }
    }
}
