use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::config;
use crate::database::DatabaseManager;
use crate::routes::app;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "travel-api")]
#[command(about = "Travel API - accounts, flights, bookings, todos and checklists over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply migrations and start the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides API_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(port).await,
        Commands::Migrate => migrate().await,
    }
}

async fn serve(port: Option<u16>) -> anyhow::Result<()> {
    let config = config();
    info!("Starting Travel API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;
    DatabaseManager::migrate(&pool)
        .await
        .context("failed to apply migrations")?;

    let bind_addr = format!("0.0.0.0:{}", port.unwrap_or(config.api.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Travel API listening on http://{}", bind_addr);
    axum::serve(listener, app(AppState::new(pool)))
        .await
        .context("server error")?;

    Ok(())
}

async fn migrate() -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config().database)
        .await
        .context("failed to open database")?;
    DatabaseManager::migrate(&pool)
        .await
        .context("failed to apply migrations")?;
    pool.close().await;
    Ok(())
}
