use serde::Serialize;

/// Correlation and directional agreement of two aligned closing columns.
///
/// `NaN` marks a statistic that could not be computed (too few rows, or a
/// column with no variance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoMovementStats {
    pub correlation: f64,
    pub sign_agreement_rate: f64,
    /// Rows that survived cleaning and alignment.
    pub rows: usize,
}

/// Correlation of one symbol's closes across two unrelated periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossPeriodStats {
    pub correlation: f64,
    /// Pairs formed after positional truncation.
    pub rows: usize,
}

/// Rounds to two decimals for display. `NaN` stays `NaN`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(0.924_910_5), 0.92);
        assert_eq!(round2(-0.666_7), -0.67);
        assert_eq!(round2(1.0), 1.0);
        assert!(round2(f64::NAN).is_nan());
    }
}
