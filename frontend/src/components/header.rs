//! Top bar with the backend status badge.

use leptos::*;

use crate::{fetch_row_count, APP_NAME, BACKEND_URL};

#[component]
pub fn Header() -> impl IntoView {
    let rows = create_local_resource(|| (), |_| async move { fetch_row_count(BACKEND_URL).await });

    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">{APP_NAME.to_uppercase()}</a>
                <span class="badge">
                    {move || match rows.get() {
                        Some(Ok(n)) => format!("{} rows", n),
                        Some(Err(e)) => {
                            log::warn!("Backend health check failed: {}", e);
                            "offline".to_string()
                        }
                        None => "-- rows".to_string(),
                    }}
                </span>
            </div>
            <div class="header-right">
                <span class="backend-url">{BACKEND_URL}</span>
            </div>
        </header>
    }
}
