use anyhow::Context;
use api_client::{MarketDataClient, YahooClient};
use axum::{routing::get, Router};
use configuration::{Config, Defaults};
use engine::Pipeline;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod charts;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub defaults: Defaults,
}

impl AppState {
    pub fn new(client: Arc<dyn MarketDataClient>, defaults: Defaults) -> Self {
        Self {
            pipeline: Pipeline::new(client),
            defaults,
        }
    }
}

/// Builds the router with every route and middleware layer.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/defaults", get(handlers::get_defaults))
        .route("/api/halving", get(handlers::get_halving))
        .route("/api/cross-period", get(handlers::get_cross_period))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing is expected to be initialized by the caller.
pub async fn run_server(addr: SocketAddr, config: &Config) -> anyhow::Result<()> {
    let client = YahooClient::new(&config.market_data).context("building market data client")?;
    let app_state = Arc::new(AppState::new(Arc::new(client), config.defaults.clone()));
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
