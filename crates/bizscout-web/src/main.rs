mod error;
mod render;
mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use bizscout_core::{providers::YelpProvider, Config, SearchService};
use bizscout_store::LocalStore;
use clap::Parser;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "bizscout")]
#[command(version, about = "Local business discovery with bookmarks and reviews", long_about = None)]
struct Cli {
    /// Path to config.toml (default: platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address override, e.g. 0.0.0.0:8080
    #[arg(long)]
    bind: Option<String>,

    /// SQLite file override
    #[arg(long)]
    db_path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so the API key can live there during development
    dotenvy::dotenv().ok();

    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bizscout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(db_path) = cli.db_path {
        config.store.db_path = db_path;
    }

    // Fail fast before binding anything: no credential, no server
    let api_key = config.require_api_key()?;

    let provider = YelpProvider::with_base_url(api_key, config.api.base_url.clone())?;
    let store = LocalStore::new(&config.store.db_path)?;
    tracing::info!("Opened store at {}", config.store.db_path);

    let app_state = Arc::new(AppState {
        service: SearchService::new(Box::new(provider)),
        store: Mutex::new(store),
    });

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("Listening on http://{}", config.server.bind);
    axum::serve(listener, routes::router(app_state)).await?;

    Ok(())
}
