use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::storage::{self, ObjectStore};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use league_server::config::AppConfig;
use league_server::repository::Repositories;
use league_server::state::AppState;
use league_server::utils::hash;
use league_server::{build_router, database, seed};

/// League administration API server.
#[derive(Parser)]
#[command(name = "league-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print an Argon2 hash of PASSWORD for seeding user rows by hand
    HashPassword {
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::HashPassword { password } => {
            let hash = hash::hash_password(&password)
                .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
            println!("{hash}");
            Ok(())
        }
        Commands::Serve => serve().await,
    }
}

async fn serve() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let repos = open_repositories(&config).await;
    let store = open_store(&config).await;

    if let (Some(repos), Some(admin)) = (&repos, &config.auth.bootstrap_admin) {
        if let Err(e) = seed::seed_bootstrap_admin(repos.users.as_ref(), admin).await {
            warn!("Failed to seed bootstrap admin: {:?}", e);
        }
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, repos, store);
    if !state.is_healthy() {
        warn!("Starting with one or more services unavailable");
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    info!("API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Repositories selected by `database.url`, or `None` if the database is unreachable.
async fn open_repositories(config: &AppConfig) -> Option<Repositories> {
    if config.database.is_memory() {
        info!("Using in-memory repositories; data is lost on restart");
        return Some(Repositories::in_memory());
    }

    let db = match database::init_db(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Database initialisation failed: {}", e);
            return None;
        }
    };
    if let Err(e) = seed::ensure_indexes(&db).await {
        warn!("Failed to ensure indexes: {}", e);
    }
    Some(Repositories::sea_orm(db))
}

async fn open_store(config: &AppConfig) -> Option<Arc<dyn ObjectStore>> {
    match storage::open(&config.storage).await {
        Ok(store) => Some(store),
        Err(e) => {
            error!("Object store initialisation failed: {}", e);
            None
        }
    }
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
