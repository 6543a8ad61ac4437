use chrono::{Days, NaiveDate};
use core_types::{DateWindow, MonthsDelta, COVID_CRASH, HALVING_2020, HALVING_2024};
use serde::Serialize;

/// Days shown after the current halving, whatever the chosen padding.
pub const CURRENT_TAIL_DAYS: u64 = 90;

/// The two comparison windows for one choice of padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HalvingWindows {
    /// Symmetric window around the 2020 halving.
    pub historical: DateWindow,
    /// Window around the 2024 halving with a fixed three-month tail.
    pub current: DateWindow,
    /// Crash reference drawn on the historical chart only.
    pub crash_marker: NaiveDate,
}

/// Derives both windows from the months of padding.
///
/// A month is always 30 days. The current window ends 90 days after its
/// halving regardless of `months`.
pub fn halving_windows(months: MonthsDelta) -> HalvingWindows {
    let pad = Days::new(months.days().unsigned_abs());

    let historical = window(HALVING_2020 - pad, HALVING_2020 + pad);
    let current = window(HALVING_2024 - pad, HALVING_2024 + Days::new(CURRENT_TAIL_DAYS));

    HalvingWindows {
        historical,
        current,
        crash_marker: COVID_CRASH,
    }
}

// The padding is at least 30 days, so start is always before end.
fn window(start: NaiveDate, end: NaiveDate) -> DateWindow {
    match DateWindow::new(start, end) {
        Ok(window) => window,
        Err(e) => unreachable!("halving window is always non-empty: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn window_lengths_follow_padding() {
        for value in MonthsDelta::OPTIONS {
            let months = MonthsDelta::try_from(value).unwrap();
            let windows = halving_windows(months);
            assert_eq!(windows.historical.num_days(), 60 * i64::from(value));
            assert_eq!(windows.current.num_days(), 30 * i64::from(value) + 90);
        }
    }

    #[test]
    fn two_year_padding_matches_calendar() {
        let windows = halving_windows(MonthsDelta::try_from(24).unwrap());
        assert_eq!(windows.historical.start(), date("2018-05-22"));
        assert_eq!(windows.historical.end(), date("2022-05-01"));
        assert_eq!(windows.current.start(), date("2022-04-30"));
        assert_eq!(windows.current.end(), date("2024-07-18"));
        assert_eq!(windows.crash_marker, date("2020-02-20"));
    }

    #[test]
    fn current_tail_is_fixed() {
        let one = halving_windows(MonthsDelta::try_from(1).unwrap());
        let three_years = halving_windows(MonthsDelta::try_from(36).unwrap());
        assert_eq!(one.current.end(), three_years.current.end());
        assert_eq!(one.historical.start(), date("2020-04-11"));
        assert_eq!(one.historical.end(), date("2020-06-10"));
        assert_eq!(three_years.current.start(), date("2021-05-05"));
    }

    #[test]
    fn derivation_is_pure() {
        let months = MonthsDelta::try_from(6).unwrap();
        assert_eq!(halving_windows(months), halving_windows(months));
    }
}
