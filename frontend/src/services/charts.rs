//! Plotly rendering of chart panels.
//!
//! Traces and layouts are built as plain JSON so they can be checked
//! without a browser; only [`render_chart`] touches JavaScript.

use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::{AppError, AppResult, ChartKind, ChartSeries};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn new_plot(
        element: &web_sys::HtmlElement,
        data: JsValue,
        layout: JsValue,
        config: JsValue,
    ) -> Result<js_sys::Promise, JsValue>;
}

/// Single Plotly trace for a series. Null values leave gaps.
pub fn trace_json(series: &ChartSeries) -> Value {
    let x: Vec<&str> = series.points.iter().map(|p| p.x.as_str()).collect();
    let y: Vec<Option<f64>> = series.points.iter().map(|p| p.y).collect();

    match series.kind {
        ChartKind::Line => json!({
            "type": "scatter",
            "mode": "lines+markers",
            "name": series.y_label,
            "x": x,
            "y": y,
        }),
        ChartKind::Bar if series.diverging => json!({
            "type": "bar",
            "name": series.y_label,
            "x": x,
            "y": y,
            "marker": {
                "color": y,
                "colorscale": "RdYlGn",
                "showscale": true,
            },
        }),
        ChartKind::Bar => json!({
            "type": "bar",
            "name": series.y_label,
            "x": x,
            "y": y,
        }),
    }
}

/// Plotly layout: title, axis labels and a categorical x axis.
pub fn layout_json(series: &ChartSeries, height: u32) -> Value {
    json!({
        "title": { "text": series.title },
        "height": height,
        "margin": { "t": 50, "r": 20, "b": 60, "l": 60 },
        "xaxis": { "title": { "text": series.x_label }, "type": "category" },
        "yaxis": { "title": { "text": series.y_label } },
    })
}

fn to_js(value: &Value) -> AppResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| AppError::Chart(e.to_string()))
}

/// Message for a Plotly failure: the error's `message`, else the thrown
/// value itself when it is a string.
pub fn chart_error_message(message: Option<String>, thrown: Option<String>) -> String {
    message
        .or(thrown)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "Plotly is not loaded".to_string())
}

fn chart_error(err: JsValue) -> AppError {
    let message = js_sys::Reflect::get(&err, &"message".into())
        .ok()
        .and_then(|v| v.as_string());
    AppError::Chart(chart_error_message(message, err.as_string()))
}

/// Draw `series` into `element`, replacing any previous plot.
///
/// Resolves once Plotly has finished drawing; a thrown error and a rejected
/// plot promise both come back as [`AppError::Chart`].
pub async fn render_chart(element: &web_sys::HtmlElement, series: &ChartSeries, height: u32) -> AppResult<()> {
    let data = to_js(&Value::Array(vec![trace_json(series)]))?;
    let layout = to_js(&layout_json(series, height))?;
    let config = to_js(&json!({ "responsive": true, "displaylogo": false }))?;

    let plotted = new_plot(element, data, layout, config).map_err(chart_error)?;
    JsFuture::from(plotted).await.map_err(chart_error)?;
    Ok(())
}
