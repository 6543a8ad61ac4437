//! Fixed calendar anchors used by the halving comparison.

use chrono::NaiveDate;

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid anchor date"),
    }
}

/// The May 2020 bitcoin halving.
pub const HALVING_2020: NaiveDate = ymd(2020, 5, 11);

/// The April 2024 bitcoin halving.
pub const HALVING_2024: NaiveDate = ymd(2024, 4, 19);

/// Start of the March 2020 market crash. Annotation only.
pub const COVID_CRASH: NaiveDate = ymd(2020, 2, 20);
