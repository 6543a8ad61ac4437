use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Months of padding around a halving. Only the dashboard's eight options are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MonthsDelta(u32);

impl MonthsDelta {
    /// Every selectable value, in the order the sidebar lists them.
    pub const OPTIONS: [u32; 8] = [1, 2, 3, 6, 9, 12, 24, 36];

    /// Returns the number of months.
    pub fn months(&self) -> u32 {
        self.0
    }

    /// Returns the padding in days, using a uniform 30-day month.
    pub fn days(&self) -> i64 {
        30 * i64::from(self.0)
    }
}

impl Default for MonthsDelta {
    fn default() -> Self {
        Self(24)
    }
}

impl TryFrom<u32> for MonthsDelta {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if Self::OPTIONS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidInput(
                "months".to_string(),
                format!("{} is not one of {:?}", value, Self::OPTIONS),
            ))
        }
    }
}

impl From<MonthsDelta> for u32 {
    fn from(value: MonthsDelta) -> Self {
        value.0
    }
}

impl fmt::Display for MonthsDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
