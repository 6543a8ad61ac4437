//! # Halving Lens Analytics
//!
//! This crate holds the statistics behind the dashboard: the comparison windows
//! around each halving, the positional alignment of two closing-price columns,
//! and the co-movement measures computed on them.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O and no async. Everything takes already-fetched
//!   `OhlcSeries` values and returns plain structs.
//! - **Degenerate input is not an error:** a statistic that cannot be computed
//!   comes back as `NaN` so the front end can show it as such.
//!
//! ## Public API
//!
//! - `halving_windows`: derives the historical and current comparison windows.
//! - `align_closes`: builds the cleaned, positionally aligned closing pair.
//! - `co_movement`: correlation and sign-agreement rate for two series.
//! - `cross_period`: correlation of one symbol across two unrelated periods.

// Declare the modules that constitute this crate.
pub mod aligner;
pub mod comovement;
pub mod cross_period;
pub mod report;
pub mod windows;

// Re-export the key components to create a clean, public-facing API.
pub use aligner::{align_closes, AlignedClosingPair};
pub use comovement::{co_movement, pair_stats, pearson, sign_agreement_rate};
pub use cross_period::cross_period;
pub use report::{round2, CoMovementStats, CrossPeriodStats};
pub use windows::{halving_windows, HalvingWindows};
