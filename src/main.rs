use anyhow::Context;
use api_client::YahooClient;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::MonthsDelta;
use engine::{ComparisonParams, CrossPeriodParams, EngineError, Pipeline};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// The main entry point for the Halving Lens dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config().context("loading configuration")?;
    let _guard = init_tracing(&config);
    tracing::debug!(
        server = ?config.server,
        market_data = %config.market_data.base_url,
        "Starting."
    );

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, &config).await,
        Commands::Compare(args) => handle_compare(args, &config).await,
        Commands::CrossPeriod(args) => handle_cross_period(args, &config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Compare two tickers around the 2020 and 2024 bitcoin halvings.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the browser dashboard.
    Serve(ServeArgs),
    /// Print correlation and sign agreement around both halvings.
    Compare(CompareArgs),
    /// Print the correlation of one ticker across two periods.
    CrossPeriod(CrossPeriodArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on (e.g., "0.0.0.0:3000"). Defaults to [server] in config.toml.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Parser)]
struct CompareArgs {
    /// The first symbol (e.g., "BTC-USD").
    #[arg(long)]
    symbol: Option<String>,

    /// The second symbol (e.g., "ETH-USD").
    #[arg(long)]
    second_symbol: Option<String>,

    /// Months around each halving: 1, 2, 3, 6, 9, 12, 24 or 36.
    #[arg(long)]
    months: Option<u32>,
}

#[derive(Parser)]
struct CrossPeriodArgs {
    /// The symbol to compare with itself.
    #[arg(long)]
    symbol: Option<String>,

    /// Start of period 1 (format: YYYY-MM-DD).
    #[arg(long)]
    start_1: Option<NaiveDate>,

    /// End of period 1 (format: YYYY-MM-DD).
    #[arg(long)]
    end_1: Option<NaiveDate>,

    /// Start of period 2 (format: YYYY-MM-DD).
    #[arg(long)]
    start_2: Option<NaiveDate>,

    /// End of period 2 (format: YYYY-MM-DD).
    #[arg(long)]
    end_2: Option<NaiveDate>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, config: &Config) -> anyhow::Result<()> {
    let addr = match args.addr {
        Some(addr) => addr,
        None => format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .context("invalid [server] host/port")?,
    };
    web_server::run_server(addr, config).await
}

async fn handle_compare(args: CompareArgs, config: &Config) -> anyhow::Result<()> {
    let defaults = &config.defaults;
    let months = match args.months {
        Some(value) => MonthsDelta::try_from(value)?,
        None => defaults.months,
    };
    let params = ComparisonParams::new(
        args.symbol.as_deref().unwrap_or(&defaults.symbol),
        args.second_symbol.as_deref().unwrap_or(&defaults.second_symbol),
        months,
    )?;

    let pipeline = pipeline(config)?;
    let report = match pipeline.run_halving(&params).await {
        Ok(report) => report,
        Err(EngineError::EmptySeries { symbol }) => {
            println!("No data returned for this symbol. ({})", symbol);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut table = Table::new();
    table.set_header(vec!["Halving", "Window", "Rows", "Correlation", "Sign Agreement Rate"]);
    for (name, panel) in [("Halving 2020", &report.historical), ("Halving 2024", &report.current)] {
        table.add_row(vec![
            name.to_string(),
            format!("{} to {}", panel.window.start(), panel.window.end()),
            panel.stats.rows.to_string(),
            format!("{:.2}", analytics::round2(panel.stats.correlation)),
            format!("{:.2}", analytics::round2(panel.stats.sign_agreement_rate)),
        ]);
    }

    println!(
        "{} and {} ({} months around each halving)",
        params.primary(),
        params.secondary(),
        months
    );
    println!("{table}");
    Ok(())
}

async fn handle_cross_period(args: CrossPeriodArgs, config: &Config) -> anyhow::Result<()> {
    let defaults = &config.defaults;
    let params = CrossPeriodParams::new(
        args.symbol.as_deref().unwrap_or(&defaults.symbol),
        (
            args.start_1.unwrap_or(defaults.period_1_start),
            args.end_1.unwrap_or(defaults.period_1_end),
        ),
        (
            args.start_2.unwrap_or(defaults.period_2_start),
            args.end_2.unwrap_or(defaults.period_2_end),
        ),
    )?;

    let pipeline = pipeline(config)?;
    match pipeline.run_cross_period(&params).await {
        Ok(report) => {
            println!(
                "Selected dates for Period 1: {} to {}",
                report.period_1.start(),
                report.period_1.end()
            );
            println!(
                "Selected dates for Period 2: {} to {}",
                report.period_2.start(),
                report.period_2.end()
            );
            println!(
                "Correlation between {} for the two periods: {:.2}",
                report.symbol,
                analytics::round2(report.stats.correlation)
            );
            Ok(())
        }
        Err(EngineError::EmptySeries { symbol }) => {
            println!("No data returned for this symbol. ({})", symbol);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn pipeline(config: &Config) -> anyhow::Result<Pipeline> {
    let client = YahooClient::new(&config.market_data)?;
    Ok(Pipeline::new(Arc::new(client)))
}

/// Installs the global subscriber: stderr always, plus a daily file when configured.
///
/// The returned guard must be held for the life of the program so the file writer flushes.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    match &config.logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "halving-lens.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stderr_layer).init();
            None
        }
    }
}
