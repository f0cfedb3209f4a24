//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Regtrack • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a href="https://plotly.com/javascript/" class="footer-link" target="_blank">
                    "Plotly.js"
                </a>
                <a href="https://leptos.dev" class="footer-link" target="_blank">
                    "Leptos"
                </a>
            </div>
        </footer>
    }
}
