use crate::error::EngineError;
use chrono::NaiveDate;
use core_types::MonthsDelta;
use serde::Serialize;

/// Everything the sidebar controls, as one explicit value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonParams {
    primary: String,
    secondary: String,
    months: MonthsDelta,
}

impl ComparisonParams {
    /// Normalizes both symbols (trimmed, uppercased). Either being blank is an error.
    pub fn new(primary: &str, secondary: &str, months: MonthsDelta) -> Result<Self, EngineError> {
        Ok(Self {
            primary: normalize_symbol(primary)?,
            secondary: normalize_symbol(secondary)?,
            months,
        })
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    pub fn months(&self) -> MonthsDelta {
        self.months
    }

    /// Resolves the ticker chosen for the cross-period panel, which must be one of the pair.
    pub fn select(&self, choice: &str) -> Result<String, EngineError> {
        let choice = normalize_symbol(choice)?;
        if choice == self.primary || choice == self.secondary {
            Ok(choice)
        } else {
            Err(EngineError::UnknownSelection(choice))
        }
    }
}

/// One symbol and the two user-picked periods to compare it across.
///
/// The periods are raw date pairs: an inverted range is not rejected here but
/// behaves like a fetch that returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossPeriodParams {
    pub symbol: String,
    pub period_1: (NaiveDate, NaiveDate),
    pub period_2: (NaiveDate, NaiveDate),
}

impl CrossPeriodParams {
    pub fn new(
        symbol: &str,
        period_1: (NaiveDate, NaiveDate),
        period_2: (NaiveDate, NaiveDate),
    ) -> Result<Self, EngineError> {
        Ok(Self {
            symbol: normalize_symbol(symbol)?,
            period_1,
            period_2,
        })
    }
}

pub fn normalize_symbol(raw: &str) -> Result<String, EngineError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(EngineError::MissingSymbol);
    }
    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_trimmed_and_uppercased() {
        let params = ComparisonParams::new(" btc-usd ", "eth-usd", MonthsDelta::default()).unwrap();
        assert_eq!(params.primary(), "BTC-USD");
        assert_eq!(params.secondary(), "ETH-USD");
    }

    #[test]
    fn blank_symbol_is_rejected() {
        let err = ComparisonParams::new("BTC-USD", "   ", MonthsDelta::default()).unwrap_err();
        assert!(matches!(err, EngineError::MissingSymbol));
    }

    #[test]
    fn selection_must_be_one_of_the_pair() {
        let params = ComparisonParams::new("BTC-USD", "ETH-USD", MonthsDelta::default()).unwrap();
        assert_eq!(params.select("eth-usd").unwrap(), "ETH-USD");
        assert!(matches!(
            params.select("SPY"),
            Err(EngineError::UnknownSelection(s)) if s == "SPY"
        ));
    }
}
