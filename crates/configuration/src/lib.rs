use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Defaults, Logging, MarketData, Server};

/// Prefix for environment overrides, e.g. `HALVING__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "HALVING";

/// Loads the application configuration from `config.toml` and the environment.
///
/// This function is the primary entry point for this crate. The file is optional:
/// every key has a built-in default, and `HALVING__<SECTION>__<KEY>` variables
/// override both.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config")
}

/// Same as [`load_config`], reading the file `name` (extension optional).
pub fn load_config_from(name: &str) -> Result<Config, ConfigError> {
    let builder = Config::with_defaults(config::Config::builder())?
        .add_source(config::File::with_name(name).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}
