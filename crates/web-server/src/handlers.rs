use crate::{charts, error::AppError, AppState};
use analytics::round2;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
    Json,
};
use chrono::NaiveDate;
use core_types::{DateWindow, MonthsDelta};
use engine::{ComparisonParams, CrossPeriodParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Sidebar state. Missing fields fall back to the configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct HalvingQuery {
    pub symbol: Option<String>,
    pub second_symbol: Option<String>,
    pub months: Option<u32>,
}

/// Cross-period panel state.
#[derive(Debug, Default, Deserialize)]
pub struct CrossPeriodQuery {
    pub symbol: Option<String>,
    pub second_symbol: Option<String>,
    /// Which of the two symbols to compare across periods; defaults to the first.
    pub selected: Option<String>,
    pub start_1: Option<NaiveDate>,
    pub end_1: Option<NaiveDate>,
    pub start_2: Option<NaiveDate>,
    pub end_2: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DefaultsResponse {
    pub symbol: String,
    pub second_symbol: String,
    pub months: u32,
    pub months_options: [u32; 8],
    pub start_1: NaiveDate,
    pub end_1: NaiveDate,
    pub start_2: NaiveDate,
    pub end_2: NaiveDate,
}

/// One column of the statistics container.
#[derive(Debug, Serialize)]
pub struct StatsPanel {
    pub title: String,
    pub description: String,
    pub correlation: String,
    pub sign_agreement_rate: String,
}

#[derive(Debug, Serialize)]
pub struct HalvingResponse {
    pub charts: Vec<Value>,
    pub stats: Vec<StatsPanel>,
}

#[derive(Debug, Serialize)]
pub struct CrossPeriodResponse {
    pub symbol: String,
    pub period_1: String,
    pub period_2: String,
    pub label: String,
    pub correlation: String,
}

/// # GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// # GET /api/defaults
/// The values the page starts with.
pub async fn get_defaults(State(state): State<Arc<AppState>>) -> Json<DefaultsResponse> {
    let d = &state.defaults;
    Json(DefaultsResponse {
        symbol: d.symbol.clone(),
        second_symbol: d.second_symbol.clone(),
        months: d.months.months(),
        months_options: MonthsDelta::OPTIONS,
        start_1: d.period_1_start,
        end_1: d.period_1_end,
        start_2: d.period_2_start,
        end_2: d.period_2_end,
    })
}

/// # GET /api/halving
/// Runs one halving comparison pass and returns both charts and both stat panels.
pub async fn get_halving(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HalvingQuery>, QueryRejection>,
) -> Result<Json<HalvingResponse>, AppError> {
    let Query(query) = query?;
    let params = comparison_params(&state, query.symbol, query.second_symbol, query.months)?;
    let report = state.pipeline.run_halving(&params).await?;

    let pair = format!("{} and {}", params.primary(), params.secondary());
    let panel = |title: &str, window: &DateWindow, stats: &analytics::CoMovementStats| {
        StatsPanel {
            title: title.to_string(),
            description: format!("{} between {} and {}", pair, window.start(), window.end()),
            correlation: display(stats.correlation),
            sign_agreement_rate: display(stats.sign_agreement_rate),
        }
    };

    Ok(Json(HalvingResponse {
        charts: charts::halving_figures(&report),
        stats: vec![
            panel("Halving 2020", &report.historical.window, &report.historical.stats),
            panel("Halving 2024", &report.current.window, &report.current.stats),
        ],
    }))
}

/// # GET /api/cross-period
/// Correlates the selected ticker's closes across the two picked periods.
pub async fn get_cross_period(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CrossPeriodQuery>, QueryRejection>,
) -> Result<Json<CrossPeriodResponse>, AppError> {
    let Query(query) = query?;
    let pair = comparison_params(&state, query.symbol, query.second_symbol, None)?;
    let symbol = match query.selected {
        Some(choice) => pair.select(&choice)?,
        None => pair.primary().to_string(),
    };

    let d = &state.defaults;
    let period_1 = (
        query.start_1.unwrap_or(d.period_1_start),
        query.end_1.unwrap_or(d.period_1_end),
    );
    let period_2 = (
        query.start_2.unwrap_or(d.period_2_start),
        query.end_2.unwrap_or(d.period_2_end),
    );

    let params = CrossPeriodParams::new(&symbol, period_1, period_2)?;
    let report = state.pipeline.run_cross_period(&params).await?;

    Ok(Json(CrossPeriodResponse {
        label: format!("Correlation between {} for the two periods:", report.symbol),
        period_1: format!("{} to {}", report.period_1.start(), report.period_1.end()),
        period_2: format!("{} to {}", report.period_2.start(), report.period_2.end()),
        correlation: display(report.stats.correlation),
        symbol: report.symbol,
    }))
}

fn comparison_params(
    state: &AppState,
    symbol: Option<String>,
    second_symbol: Option<String>,
    months: Option<u32>,
) -> Result<ComparisonParams, AppError> {
    let d = &state.defaults;
    let months = match months {
        Some(value) => MonthsDelta::try_from(value)?,
        None => d.months,
    };
    let symbol = symbol.unwrap_or_else(|| d.symbol.clone());
    let second_symbol = second_symbol.unwrap_or_else(|| d.second_symbol.clone());
    Ok(ComparisonParams::new(&symbol, &second_symbol, months)?)
}

/// Two decimals; an undefined statistic reads `NaN`.
fn display(value: f64) -> String {
    format!("{:.2}", round2(value))
}
