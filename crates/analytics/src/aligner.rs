use core_types::OhlcSeries;

/// Two equal-length closing-price columns, paired by row position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedClosingPair {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl AlignedClosingPair {
    /// Pairs two already-cleaned columns by row index, cut to the shorter.
    pub(crate) fn positional(mut a: Vec<f64>, mut b: Vec<f64>) -> Self {
        let rows = a.len().min(b.len());
        a.truncate(rows);
        b.truncate(rows);
        Self { a, b }
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn swapped(&self) -> Self {
        Self {
            a: self.b.clone(),
            b: self.a.clone(),
        }
    }
}

/// Pairs the closes of `a` and `b` by row index and drops unusable rows.
///
/// Row `i` of `a` is matched with row `i` of `b` whatever their dates are;
/// rows past the shorter series are discarded. A close of exactly zero or a
/// non-finite close marks its whole row missing, and missing rows are
/// removed from both columns.
pub fn align_closes(a: &OhlcSeries, b: &OhlcSeries) -> AlignedClosingPair {
    let (left, right): (Vec<f64>, Vec<f64>) = a
        .bars
        .iter()
        .zip(&b.bars)
        .map(|(x, y)| (x.close, y.close))
        .filter(|&(x, y)| is_present(x) && is_present(y))
        .unzip();

    tracing::debug!(
        a = %a.symbol,
        b = %b.symbol,
        a_rows = a.len(),
        b_rows = b.len(),
        aligned = left.len(),
        "Aligned closing prices."
    );

    AlignedClosingPair { a: left, b: right }
}

fn is_present(close: f64) -> bool {
    close.is_finite() && close != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use core_types::OhlcBar;

    fn series(symbol: &str, closes: &[f64]) -> OhlcSeries {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcBar {
                date: first + Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
            })
            .collect();
        OhlcSeries::new(symbol, bars)
    }

    #[test]
    fn zero_close_drops_the_whole_row() {
        let a = series("A", &[10.0, 10.0, 12.0, 0.0, 15.0]);
        let b = series("B", &[5.0, 6.0, 6.0, 7.0, 8.0]);

        let pair = align_closes(&a, &b);
        assert_eq!(pair.a(), &[10.0, 10.0, 12.0, 15.0]);
        assert_eq!(pair.b(), &[5.0, 6.0, 6.0, 8.0]);
    }

    #[test]
    fn gaps_in_either_column_are_dropped() {
        let a = series("A", &[1.0, f64::NAN, 3.0, 4.0]);
        let b = series("B", &[2.0, 2.0, f64::INFINITY, 5.0]);

        let pair = align_closes(&a, &b);
        assert_eq!(pair.a(), &[1.0, 4.0]);
        assert_eq!(pair.b(), &[2.0, 5.0]);
    }

    #[test]
    fn pairs_by_position_and_truncates_to_shorter() {
        let a = series("A", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut b = series("B", &[9.0, 8.0, 7.0]);
        // Dates are ignored: shift b by a year and pairing is unchanged.
        for bar in &mut b.bars {
            bar.date = bar.date + Days::new(365);
        }

        let pair = align_closes(&a, &b);
        assert_eq!(pair.len(), 3);
        assert_eq!(pair.a(), &[1.0, 2.0, 3.0]);
        assert_eq!(pair.b(), &[9.0, 8.0, 7.0]);
    }

    #[test]
    fn empty_input_yields_empty_pair() {
        let pair = align_closes(&series("A", &[]), &series("B", &[1.0]));
        assert!(pair.is_empty());
    }

    #[test]
    fn positional_pair_is_cut_to_the_shorter_column() {
        let pair = AlignedClosingPair::positional(vec![1.0], vec![1.0, 2.0]);
        assert_eq!(pair.a(), &[1.0]);
        assert_eq!(pair.b(), &[1.0]);

        let pair = AlignedClosingPair::positional(vec![], vec![3.0]);
        assert!(pair.is_empty());
        assert!(pair.b().is_empty());
    }
}
