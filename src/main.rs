use anyhow::Context;
use clap::Parser;

use portfolio_api::app::{build_router, AppState};
use portfolio_api::config::AppConfig;
use portfolio_api::db::connection;

#[derive(Debug, Parser)]
#[command(name = "portfolio-api", about = "REST backend for portfolio works, tags and archive")]
struct Cli {
    /// Configuration file path, without extension.
    #[arg(long, default_value = "portfolio")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_api=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // A missing .env file is fine; variables may come from the environment.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {e}");
    }

    let config = AppConfig::load_from(&cli.config).context("Failed to load configuration")?;

    tracing::info!("Starting portfolio API...");

    // No route is registered and no port bound until the database answers.
    let db = match connection::connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to the database: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(database = %config.database, "Connected to database");

    let app = build_router(AppState::from_database(&db), &config.static_dir);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("App running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
