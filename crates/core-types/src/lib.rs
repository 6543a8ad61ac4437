pub mod anchors;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use anchors::{COVID_CRASH, HALVING_2020, HALVING_2024};
pub use enums::MonthsDelta;
pub use error::CoreError;
pub use structs::{DateWindow, OhlcBar, OhlcSeries};
