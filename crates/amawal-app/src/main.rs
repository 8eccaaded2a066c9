use std::path::PathBuf;
use std::sync::Arc;

use amawal_config::Config;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod command;
pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod ui;


use self::controller::AppController;
use self::state::AppState;

/// Federated search over the Amawal dictionaries
#[derive(Parser, Debug)]
#[command(name = "amawal", version)]
struct Args {
    /// JSON config profile, defaults plus environment when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dictionary backend URL
    #[arg(long)]
    api_url: Option<String>,

    /// Maximum rows per search
    #[arg(long)]
    max_results: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    if let Some(api_url) = args.api_url {
        config.gateway.base_url = api_url;
    }
    if let Some(max_results) = args.max_results {
        config.search.max_results = max_results;
    }
    config.validate()?;

    init_tracing(&config);
    tracing::info!("Using dictionary backend at {}", config.gateway.base_url);

    let state = Arc::new(AppState::new(config)?);
    state.session.start().await;

    let controller = AppController::new(state.clone());
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Shutdown requested"),
                Err(e) => tracing::error!("failed to listen for ctrl+c: {e}"),
            }
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("task exited, shutting down"),
                Ok(Err(e)) => tracing::error!("task failed: {e:#}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
