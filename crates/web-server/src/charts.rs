//! Plotly figure descriptions for the two halving charts.
//!
//! The browser hands each value straight to `Plotly.newPlot`.

use chrono::NaiveDate;
use core_types::OhlcSeries;
use engine::{HalvingPanel, HalvingReport};
use serde_json::{json, Value};

const HALVING_COLOR: &str = "white";
const CRASH_COLOR: &str = "red";

/// A dashed vertical line with a legend entry.
struct Marker<'a> {
    date: NaiveDate,
    color: &'a str,
    name: &'a str,
}

/// Both figures in display order: the current halving first, then the last one.
pub fn halving_figures(report: &HalvingReport) -> Vec<Value> {
    let current = figure(
        "Current Halving, April 2024",
        &report.current,
        &[Marker {
            date: report.current.halving,
            color: HALVING_COLOR,
            name: "Halving",
        }],
    );
    let historical = figure(
        "Last Halving, May 2020",
        &report.historical,
        &[
            Marker {
                date: report.historical.halving,
                color: HALVING_COLOR,
                name: "Halving",
            },
            Marker {
                date: report.crash_marker,
                color: CRASH_COLOR,
                name: "cov_crash",
            },
        ],
    );
    vec![current, historical]
}

fn figure(title: &str, panel: &HalvingPanel, markers: &[Marker<'_>]) -> Value {
    let mut data = vec![
        trace(&panel.primary, "y"),
        trace(&panel.secondary, "y2"),
    ];
    data.extend(markers.iter().map(legend_entry));

    let shapes: Vec<Value> = markers.iter().map(vline).collect();

    json!({
        "data": data,
        "layout": {
            "height": 600,
            "title": { "text": title },
            "template": "seaborn",
            "plot_bgcolor": "rgba(211, 211, 211, 0.05)",
            "shapes": shapes,
            "xaxis": {
                "domain": [0.05, 0.95],
                "type": "date",
                "tickformat": "%b %Y",
                "showgrid": true,
                "gridwidth": 1,
                "rangeslider": { "visible": true },
                "range": [panel.window.start().to_string(), panel.window.end().to_string()],
            },
            "yaxis": { "title": { "text": format!("{} USD", panel.primary.symbol) } },
            "yaxis2": {
                "title": { "text": format!("{} USD", panel.secondary.symbol) },
                "showgrid": false,
                "overlaying": "y",
                "side": "right",
            },
        },
    })
}

/// A line trace of closing prices. Gaps serialize as `null`, which Plotly leaves blank.
fn trace(series: &OhlcSeries, axis: &str) -> Value {
    let x: Vec<String> = series.dates().iter().map(ToString::to_string).collect();
    let y: Vec<Option<f64>> = series
        .closes()
        .into_iter()
        .map(|close| close.is_finite().then_some(close))
        .collect();

    json!({
        "type": "scatter",
        "mode": "lines",
        "name": series.symbol,
        "x": x,
        "y": y,
        "yaxis": axis,
    })
}

fn vline(marker: &Marker<'_>) -> Value {
    let x = marker.date.to_string();
    json!({
        "type": "line",
        "xref": "x",
        "yref": "paper",
        "x0": x,
        "x1": x,
        "y0": 0,
        "y1": 1,
        "line": { "color": marker.color, "width": 2, "dash": "dash" },
    })
}

// Shapes have no legend in Plotly, so each marker gets an empty trace that carries its name.
fn legend_entry(marker: &Marker<'_>) -> Value {
    json!({
        "type": "scatter",
        "mode": "lines",
        "name": marker.name,
        "x": [Value::Null],
        "y": [Value::Null],
        "showlegend": true,
        "line": { "color": marker.color, "width": 2, "dash": "dash" },
    })
}
