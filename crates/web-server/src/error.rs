use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use engine::EngineError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Pipeline error: {0}")]
    Engine(#[from] EngineError),
    #[error("Invalid parameter: {0}")]
    Core(#[from] core_types::CoreError),
    #[error("Malformed query: {0}")]
    Query(#[from] QueryRejection),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Engine(EngineError::EmptySeries { symbol }) => {
                tracing::warn!(%symbol, "No data for pass.");
                (
                    StatusCode::NOT_FOUND,
                    "No data returned for this symbol.".to_string(),
                )
            }
            AppError::Engine(EngineError::ApiClient(api_err)) => {
                tracing::error!(error = ?api_err, "Market data error.");
                (
                    StatusCode::BAD_GATEWAY,
                    "The market data source could not be reached".to_string(),
                )
            }
            AppError::Engine(other) => (StatusCode::BAD_REQUEST, other.to_string()),
            AppError::Core(core_err) => (StatusCode::BAD_REQUEST, core_err.to_string()),
            AppError::Query(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
