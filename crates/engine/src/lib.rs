//! One render pass of the dashboard as a pure pipeline:
//! parameters → windows → fetch → align → statistics.
//!
//! Nothing is cached between passes; every call fetches again.

use analytics::{co_movement, cross_period, halving_windows};
use api_client::MarketDataClient;
use chrono::NaiveDate;
use core_types::{DateWindow, OhlcSeries, HALVING_2020, HALVING_2024};
use std::sync::Arc;

pub mod error;
pub mod params;
pub mod report;

pub use error::EngineError;
pub use params::{ComparisonParams, CrossPeriodParams};
pub use report::{CrossPeriodReport, HalvingPanel, HalvingReport};

/// Runs comparison passes against a market data source.
#[derive(Clone)]
pub struct Pipeline {
    client: Arc<dyn MarketDataClient>,
}

impl Pipeline {
    pub fn new(client: Arc<dyn MarketDataClient>) -> Self {
        Self { client }
    }

    /// Compares the two symbols around both halvings.
    ///
    /// All four series are fetched before anything is computed. If any of them
    /// is empty the pass stops with `EmptySeries` and neither panel is produced.
    pub async fn run_halving(
        &self,
        params: &ComparisonParams,
    ) -> Result<HalvingReport, EngineError> {
        let windows = halving_windows(params.months());
        tracing::info!(
            primary = params.primary(),
            secondary = params.secondary(),
            months = %params.months(),
            "Running halving comparison."
        );

        let (primary_hist, secondary_hist, primary_cur, secondary_cur) = futures::try_join!(
            self.client.fetch(params.primary(), &windows.historical),
            self.client.fetch(params.secondary(), &windows.historical),
            self.client.fetch(params.primary(), &windows.current),
            self.client.fetch(params.secondary(), &windows.current),
        )?;

        for series in [&primary_hist, &secondary_hist, &primary_cur, &secondary_cur] {
            ensure_not_empty(series)?;
        }

        let historical = panel(HALVING_2020, windows.historical, primary_hist, secondary_hist);
        let current = panel(HALVING_2024, windows.current, primary_cur, secondary_cur);

        Ok(HalvingReport {
            params: params.clone(),
            crash_marker: windows.crash_marker,
            historical,
            current,
        })
    }

    /// Correlates one symbol's closes across two user-picked periods.
    pub async fn run_cross_period(
        &self,
        params: &CrossPeriodParams,
    ) -> Result<CrossPeriodReport, EngineError> {
        tracing::info!(
            symbol = %params.symbol,
            period_1 = ?params.period_1,
            period_2 = ?params.period_2,
            "Running cross-period comparison."
        );

        let (first, second) = futures::try_join!(
            self.fetch_range(&params.symbol, params.period_1),
            self.fetch_range(&params.symbol, params.period_2),
        )?;

        let (Some((period_1, first)), Some((period_2, second))) = (first, second) else {
            return Err(EngineError::EmptySeries {
                symbol: params.symbol.clone(),
            });
        };
        ensure_not_empty(&first)?;
        ensure_not_empty(&second)?;

        Ok(CrossPeriodReport {
            symbol: params.symbol.clone(),
            period_1,
            period_2,
            stats: cross_period(&first, &second),
        })
    }

    /// Fetches a user-entered range. An inverted range makes no request and yields `None`.
    async fn fetch_range(
        &self,
        symbol: &str,
        (start, end): (NaiveDate, NaiveDate),
    ) -> Result<Option<(DateWindow, OhlcSeries)>, EngineError> {
        let Ok(window) = DateWindow::new(start, end) else {
            tracing::warn!(
                symbol,
                %start,
                %end,
                "End date is not after start date, treating as no data."
            );
            return Ok(None);
        };
        let series = self.client.fetch(symbol, &window).await?;
        Ok(Some((window, series)))
    }
}

fn ensure_not_empty(series: &OhlcSeries) -> Result<(), EngineError> {
    if series.is_empty() {
        tracing::warn!(symbol = %series.symbol, "No data returned for this symbol.");
        return Err(EngineError::EmptySeries {
            symbol: series.symbol.clone(),
        });
    }
    Ok(())
}

fn panel(
    halving: NaiveDate,
    window: DateWindow,
    primary: OhlcSeries,
    secondary: OhlcSeries,
) -> HalvingPanel {
    let stats = co_movement(&primary, &secondary);
    HalvingPanel {
        halving,
        window,
        primary,
        secondary,
        stats,
    }
}
