//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Vehicle Registration Dashboard"</h1>
            <p class="subtitle">
                "Quarterly registrations by manufacturer, with quarter-on-quarter "
                "and year-on-year growth."
            </p>
        </div>
    }
}
