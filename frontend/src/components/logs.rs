//! Backend activity stream using Server-Sent Events (SSE).
//!
//! Connects to the backend's `/api/logs` endpoint and lists ingestion and
//! query activity, newest at the bottom.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use crate::{LogEntry, BACKEND_URL, MAX_LOG_ENTRIES};

/// Parse an SSE payload, stamping it with local HH:MM:SS.
pub fn parse_sse_log(json: &str) -> Option<LogEntry> {
    let mut entry: LogEntry = serde_json::from_str(json).ok()?;
    entry.timestamp = chrono::DateTime::parse_from_rfc3339(&entry.timestamp)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| chrono::Local::now().format("%H:%M:%S").to_string());
    Some(entry)
}

/// Append an entry, dropping the oldest beyond [`MAX_LOG_ENTRIES`].
pub fn push_log(logs: &mut Vec<LogEntry>, entry: LogEntry) {
    logs.push(entry);
    if logs.len() > MAX_LOG_ENTRIES {
        let excess = logs.len() - MAX_LOG_ENTRIES;
        logs.drain(..excess);
    }
}

/// Start SSE connection to receive real-time logs.
/// Should be called ONCE at app startup.
pub fn init_sse_logs(set_logs: WriteSignal<Vec<LogEntry>>) {
    let sse_url = format!("{}/api/logs", BACKEND_URL);

    let event_source = match EventSource::new(&sse_url) {
        Ok(es) => es,
        Err(e) => {
            log::error!("Failed to create EventSource: {:?}", e);
            return;
        }
    };

    let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Some(entry) = event.data().as_string().as_deref().and_then(parse_sse_log) {
            set_logs.update(|logs| push_log(logs, entry));
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    event_source.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
        log::info!("📡 SSE connected to logs stream");
    }) as Box<dyn FnMut(web_sys::Event)>);
    event_source.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
        log::warn!("SSE connection error - will auto-reconnect");
    }) as Box<dyn FnMut(web_sys::Event)>);
    event_source.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    // Lives for the whole session
    std::mem::forget(event_source);

    log::info!("📡 SSE log stream initialized");
}

/// Activity panel (display only, SSE is initialized elsewhere)
#[component]
pub fn LogsPanel(
    logs: ReadSignal<Vec<LogEntry>>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let logs_container = create_node_ref::<leptos::html::Div>();

    // Keep the newest entry in view
    create_effect(move |_| {
        let _ = logs.get();
        if let Some(container) = logs_container.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="logs-panel">
            <div class="logs-header">
                <span class="logs-title">"📋 Backend Activity"</span>
                <button class="logs-clear" on:click=move |_| set_logs.set(vec![])>
                    "Clear"
                </button>
            </div>
            <div class="logs-content" node_ref=logs_container>
                <Show when=move || logs.with(|l| l.is_empty()) fallback=|| ()>
                    <div class="log-entry log-info">"No activity yet"</div>
                </Show>
                <For
                    each=move || logs.get().into_iter().enumerate()
                    key=|(i, entry)| (*i, entry.timestamp.clone())
                    children=move |(_, entry)| {
                        let padding = format!("padding-left: {}em", entry.indent as u32 * 2);
                        view! {
                            <div class=format!("log-entry {}", entry.level.css_class()) style=padding>
                                <span class="log-time">"[" {entry.timestamp.clone()} "] "</span>
                                {entry.level.emoji()} " " {entry.message.clone()}
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogLevel;

    #[test]
    fn test_parse_sse_log() {
        let entry = parse_sse_log(
            r#"{"level":"warning","message":"Skipping notes (not a year directory)","indent":1,"timestamp":"2024-05-01T10:20:30+00:00"}"#,
        )
        .unwrap();
        assert_eq!(entry.level, LogLevel::Warning);
        assert_eq!(entry.indent, 1);
        assert_eq!(entry.timestamp.len(), 8);

        assert!(parse_sse_log("keep-alive").is_none());
    }

    #[test]
    fn test_push_log_caps_history() {
        let mut logs = Vec::new();
        for i in 0..(MAX_LOG_ENTRIES + 3) {
            push_log(
                &mut logs,
                LogEntry {
                    level: LogLevel::Info,
                    message: i.to_string(),
                    indent: 0,
                    timestamp: String::new(),
                },
            );
        }
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "3");
    }
}
