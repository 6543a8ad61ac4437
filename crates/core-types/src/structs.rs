use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A half-open calendar range `[start, end)` used for fetching and charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting ranges where `start` is not strictly before `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Length of the window in days.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// One daily bar. Gaps reported by the data source are carried as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// An ascending-by-date daily series for one symbol. May be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcSeries {
    pub symbol: String,
    pub bars: Vec<OhlcBar>,
}

impl OhlcSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<OhlcBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// An empty series, as returned for unknown symbols.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// The closing-price column in row order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn window_requires_start_before_end() {
        let window = DateWindow::new(date("2020-01-01"), date("2020-01-31")).unwrap();
        assert_eq!(window.num_days(), 30);

        let same_day = DateWindow::new(date("2020-01-01"), date("2020-01-01"));
        assert!(matches!(same_day, Err(CoreError::InvalidDateRange { .. })));

        let inverted = DateWindow::new(date("2020-03-01"), date("2019-12-01"));
        assert!(inverted.is_err());
    }

    #[test]
    fn series_exposes_close_column_in_row_order() {
        let bar = |d: &str, close: f64| OhlcBar {
            date: date(d),
            open: close,
            high: close,
            low: close,
            close,
        };
        let series = OhlcSeries::new(
            "BTC-USD",
            vec![bar("2024-01-01", 3.0), bar("2024-01-02", f64::NAN), bar("2024-01-03", 1.0)],
        );

        let closes = series.closes();
        assert_eq!(closes.len(), 3);
        assert_eq!(closes[0], 3.0);
        assert!(closes[1].is_nan());
        assert_eq!(closes[2], 1.0);
        assert!(!series.is_empty());
        assert!(OhlcSeries::empty("X").is_empty());
    }
}
