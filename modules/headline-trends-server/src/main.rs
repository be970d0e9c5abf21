use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use headline_trends_core::{file_config, AppConfig, HeadlineSearch};
use headline_trends_domains::{CachedHeadlineSearch, PgHeadlineSearch};
use headline_trends_server::{build_router, AppState};

#[derive(Parser)]
#[command(name = "headline-trends-server", about = "Headline keyword trends API")]
struct Cli {
    /// Path to config TOML file
    #[arg(long, default_value = "./config/headline-trends.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting headline-trends-server");

    let cli = Cli::parse();

    let config_path = cli.config.canonicalize().with_context(|| {
        format!(
            "Config file not found: {}. Create one or specify --config <path>",
            cli.config.display()
        )
    })?;
    tracing::info!(config = %config_path.display(), "Loading config");
    let file_config = file_config::load_config(&config_path)?;

    // Load secrets from env vars
    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .max_lifetime(Duration::from_secs(3600))
        .test_before_acquire(true)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "Connected to database"
    );

    let postgres: Arc<dyn HeadlineSearch> = Arc::new(PgHeadlineSearch::new(pool));
    let search: Arc<dyn HeadlineSearch> = Arc::new(CachedHeadlineSearch::new(
        postgres,
        Duration::from_secs(file_config.cache.occurrences_ttl_secs),
    ));

    let app = build_router(
        AppState::new(search, file_config.rate_limit.clone()),
        &file_config.server,
    );

    let addr = format!("{}:{}", file_config.server.host, file_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        addr = %addr,
        allowed_origins = ?file_config.server.allowed_origins,
        cache_ttl_secs = file_config.cache.occurrences_ttl_secs,
        requests_per_window = file_config.rate_limit.requests_per_window,
        "Headline trends API listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
