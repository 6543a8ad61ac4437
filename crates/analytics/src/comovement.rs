use crate::aligner::{align_closes, AlignedClosingPair};
use crate::report::CoMovementStats;
use core_types::OhlcSeries;
use std::cmp::Ordering;

/// Aligns two series fetched over the same window and measures how they move together.
pub fn co_movement(a: &OhlcSeries, b: &OhlcSeries) -> CoMovementStats {
    pair_stats(&align_closes(a, b))
}

/// Computes both statistics on an already aligned pair.
pub fn pair_stats(pair: &AlignedClosingPair) -> CoMovementStats {
    CoMovementStats {
        correlation: pearson(pair.a(), pair.b()),
        sign_agreement_rate: sign_agreement_rate(pair),
        rows: pair.len(),
    }
}

/// Pearson correlation of two equal-length columns.
///
/// Returns `NaN` for fewer than two rows, for columns of different length,
/// or when either column has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }
    // Checked on the raw values: a float mean of a constant column can miss
    // by an ulp and leave a tiny non-zero variance.
    if is_constant(x) || is_constant(y) {
        return f64::NAN;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Fraction of day-over-day moves whose signs match.
///
/// Row 0 has no previous value and is not counted. Two unchanged days
/// (sign 0 on both sides) agree. Fewer than two rows gives `NaN`.
pub fn sign_agreement_rate(pair: &AlignedClosingPair) -> f64 {
    if pair.len() < 2 {
        return f64::NAN;
    }

    let moves = pair.len() - 1;
    let agreeing = pair
        .a()
        .windows(2)
        .zip(pair.b().windows(2))
        .filter(|(a, b)| sign(a[1] - a[0]) == sign(b[1] - b[0]))
        .count();

    agreeing as f64 / moves as f64
}

fn is_constant(column: &[f64]) -> bool {
    column.iter().all(|&v| v == column[0])
}

fn sign(delta: f64) -> Ordering {
    delta.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}
