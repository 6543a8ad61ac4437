use crate::aligner::AlignedClosingPair;
use crate::comovement::pearson;
use crate::report::CrossPeriodStats;
use core_types::OhlcSeries;

/// Correlates one symbol's closes in two independently sized periods.
///
/// Each column is cleaned on its own (non-finite closes removed, zeros kept),
/// then the two are paired by row index and cut to the shorter length. The
/// calendar dates play no part, so this is a coarse shape comparison.
pub fn cross_period(first: &OhlcSeries, second: &OhlcSeries) -> CrossPeriodStats {
    let left = finite_closes(first);
    let right = finite_closes(second);
    let (first_rows, second_rows) = (left.len(), right.len());
    let pair = AlignedClosingPair::positional(left, right);

    let stats = CrossPeriodStats {
        correlation: pearson(pair.a(), pair.b()),
        rows: pair.len(),
    };
    tracing::debug!(
        symbol = %first.symbol,
        first_rows,
        second_rows,
        rows = stats.rows,
        "Cross-period correlation computed."
    );
    stats
}

fn finite_closes(series: &OhlcSeries) -> Vec<f64> {
    series
        .bars
        .iter()
        .map(|bar| bar.close)
        .filter(|close| close.is_finite())
        .collect()
}
