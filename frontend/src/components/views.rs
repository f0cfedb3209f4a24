//! Result sections for the two dashboard modes.

use leptos::*;

use crate::{
    ChartPanelView, ComparisonView, NoticeBox, NoticeLevel, RawTable, SingleView, CHART_HEIGHT,
    COMPARISON_CHART_HEIGHT,
};

#[component]
pub fn SingleSection(data: SingleView) -> impl IntoView {
    let SingleView { caption, panels, rows, .. } = data;
    view! {
        <section class="results">
            <p class="caption">{caption}</p>
            {panels
                .into_iter()
                .map(|panel| view! { <ChartPanelView panel=panel height=CHART_HEIGHT/> })
                .collect_view()}
            {rows.map(|rows| view! { <RawTable rows=rows/> })}
        </section>
    }
}

/// One column per maker, each with its three charts stacked.
#[component]
pub fn ComparisonSection(data: ComparisonView) -> impl IntoView {
    let ComparisonView { caption, notices, makers, .. } = data;
    let caption = (!makers.is_empty()).then(|| view! { <p class="caption">{caption}</p> });
    let columns = format!("grid-template-columns: repeat({}, minmax(0, 1fr))", makers.len().max(1));
    view! {
        <section class="results">
            {notices
                .into_iter()
                .map(|n| view! { <NoticeBox level=n.level message=n.message/> })
                .collect_view()}
            {caption}
            <div class="comparison-grid" style=columns>
                {makers
                    .into_iter()
                    .map(|column| view! {
                        <div class="comparison-column">
                            <h3>{column.maker}</h3>
                            {column
                                .panels
                                .into_iter()
                                .map(|panel| view! { <ChartPanelView panel=panel height=COMPARISON_CHART_HEIGHT/> })
                                .collect_view()}
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

/// Placeholder shown until the first request for a mode.
#[component]
pub fn PromptNotice(#[prop(into)] message: String) -> impl IntoView {
    view! { <NoticeBox level=NoticeLevel::Info message=message/> }
}
