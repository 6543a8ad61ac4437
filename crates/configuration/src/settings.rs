use crate::error::ConfigError;
use chrono::NaiveDate;
use config::builder::{ConfigBuilder, DefaultState};
use core_types::MonthsDelta;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: Server,
    pub market_data: MarketData,
    pub defaults: Defaults,
    pub logging: Logging,
}

/// Where the dashboard listens.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Settings for the upstream daily-history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketData {
    /// Base URL of the chart API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. A slow fetch blocks the whole pass until this elapses.
    pub timeout_secs: u64,
    /// Sent as the `User-Agent` header; the upstream rejects empty agents.
    pub user_agent: String,
}

/// Values the sidebar and the cross-period pickers start with.
#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    pub symbol: String,
    pub second_symbol: String,
    pub months: MonthsDelta,
    pub period_1_start: NaiveDate,
    pub period_1_end: NaiveDate,
    pub period_2_start: NaiveDate,
    pub period_2_end: NaiveDate,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// An `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Config {
    /// Seeds a builder with every default so a missing file still loads.
    pub(crate) fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("market_data.base_url", "https://query2.finance.yahoo.com")?
            .set_default("market_data.timeout_secs", 30)?
            .set_default("market_data.user_agent", "Mozilla/5.0 (compatible; halving-lens/0.1)")?
            .set_default("defaults.symbol", "BTC-USD")?
            .set_default("defaults.second_symbol", "ETH-USD")?
            .set_default("defaults.months", 24)?
            .set_default("defaults.period_1_start", "2019-12-01")?
            .set_default("defaults.period_1_end", "2020-03-01")?
            .set_default("defaults.period_2_start", "2023-12-01")?
            .set_default("defaults.period_2_end", "2024-03-01")?
            .set_default("logging.level", "info")?)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.symbol.trim().is_empty() || self.defaults.second_symbol.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "defaults.symbol and defaults.second_symbol must not be empty".to_string(),
            ));
        }
        if self.market_data.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "market_data.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.market_data.base_url.ends_with('/') {
            return Err(ConfigError::ValidationError(
                "market_data.base_url must not end with '/'".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn load(toml: &str) -> Result<Config, ConfigError> {
        let config = Config::with_defaults(config::Config::builder())?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn empty_file_uses_dashboard_defaults() {
        let config = load("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.defaults.symbol, "BTC-USD");
        assert_eq!(config.defaults.second_symbol, "ETH-USD");
        assert_eq!(config.defaults.months.months(), 24);
        assert_eq!(config.defaults.period_1_start.to_string(), "2019-12-01");
        assert_eq!(config.defaults.period_2_end.to_string(), "2024-03-01");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = load(
            r#"
            [server]
            port = 8080

            [defaults]
            symbol = "SPY"
            months = 6

            [logging]
            level = "debug"
            directory = "logs"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.defaults.symbol, "SPY");
        assert_eq!(config.defaults.months.months(), 6);
        assert_eq!(config.logging.directory.as_deref(), Some("logs"));
    }

    #[test]
    fn rejects_months_outside_options() {
        assert!(load("[defaults]\nmonths = 5\n").is_err());
    }

    #[test]
    fn rejects_blank_symbol() {
        let err = load("[defaults]\nsymbol = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
