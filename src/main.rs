//! FeedHub server: blog/feed backend with REST, GraphQL and WebSocket APIs.
//!
//! Main entry point that loads configuration, initialises logging and
//! dispatches the CLI subcommand.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use feedhub_core::config::AppConfig;
use feedhub_core::error::AppError;
use feedhub_database::Stores;

/// FeedHub blog/feed backend
#[derive(Debug, Parser)]
#[command(name = "feedhub-server", version, about, long_about = None)]
struct Cli {
    /// Directory holding `default.toml` and the environment overlays
    #[arg(short, long, default_value = "config")]
    config_dir: String,

    /// Environment overlay to load (`<config_dir>/<env>.toml`)
    #[arg(short, long, default_value = "development")]
    env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Apply pending database migrations and exit
    Migrate,
}

/// Arguments for the serve command
#[derive(Debug, Args)]
struct ServeArgs {
    /// Override the configured port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the configured bind address
    #[arg(long)]
    host: Option<String>,

    /// Skip migrations on startup
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load_from(&cli.config_dir, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command {
        Commands::Serve(args) => serve(config, args).await,
        Commands::Migrate => migrate(config).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "FeedHub exited with an error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn serve(mut config: AppConfig, args: ServeArgs) -> Result<(), AppError> {
    tracing::info!("Starting FeedHub v{}", env!("CARGO_PKG_VERSION"));

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    let stores = Stores::from_config(&config.database).await?;
    if let Some(pool) = &stores.pool {
        if args.no_migrate {
            tracing::info!("Skipping database migrations");
        } else {
            feedhub_database::migration::run_migrations(pool.pool()).await?;
        }
    }

    feedhub_api::run_server(config, stores).await
}

async fn migrate(config: AppConfig) -> Result<(), AppError> {
    let stores = Stores::from_config(&config.database).await?;
    let pool = stores.pool.ok_or_else(|| {
        AppError::configuration("Migrations require the postgres database provider")
    })?;

    feedhub_database::migration::run_migrations(pool.pool()).await?;
    pool.close().await;
    Ok(())
}
