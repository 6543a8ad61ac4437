use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Please enter a stock symbol.")]
    MissingSymbol,

    #[error("No data returned for this symbol: {symbol}")]
    EmptySeries { symbol: String },

    #[error("'{0}' is not one of the compared symbols.")]
    UnknownSelection(String),

    #[error("Invalid parameter: {0}")]
    Core(#[from] core_types::CoreError),

    #[error("Market data error: {0}")]
    ApiClient(#[from] api_client::error::ApiError),
}
