use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::EnvFilter;

use librarium::api::rest::{routes, state::AppState};
use librarium::config;
use librarium::domain::users::UsersConfig;
use librarium::infra::storage::migrations::Migrator;

/// Library reservation REST backend
#[derive(Parser)]
#[command(name = "librarium-server")]
#[command(about = "Library reservation REST backend")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    ensure!(
        !config.auth.token_secret.is_empty(),
        "auth.token_secret must be set (e.g. via LIBRARIUM_AUTH__TOKEN_SECRET)"
    );

    let db = Database::connect(&config.database.url)
        .await
        .with_context(|| format!("failed to connect to {}", config.database.url))?;
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;

    let state = AppState::new(db, UsersConfig::default(), config.auth.clone().into());
    let app = routes::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "librarium-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
