use crate::params::ComparisonParams;
use analytics::{CoMovementStats, CrossPeriodStats};
use chrono::NaiveDate;
use core_types::{DateWindow, OhlcSeries};
use serde::Serialize;

/// One halving's window, both fetched series and their co-movement.
#[derive(Debug, Clone, Serialize)]
pub struct HalvingPanel {
    pub halving: NaiveDate,
    pub window: DateWindow,
    pub primary: OhlcSeries,
    pub secondary: OhlcSeries,
    pub stats: CoMovementStats,
}

/// The result of one halving comparison pass.
#[derive(Debug, Clone, Serialize)]
pub struct HalvingReport {
    pub params: ComparisonParams,
    /// Drawn on the historical chart only.
    pub crash_marker: NaiveDate,
    pub historical: HalvingPanel,
    pub current: HalvingPanel,
}

/// The result of one cross-period pass.
#[derive(Debug, Clone, Serialize)]
pub struct CrossPeriodReport {
    pub symbol: String,
    pub period_1: DateWindow,
    pub period_2: DateWindow,
    pub stats: CrossPeriodStats,
}
