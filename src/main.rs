use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use paraph_proxy::commands;
use paraph_proxy::config;
use paraph_proxy::error::Result;
use paraph_proxy::state::AppState;
use paraph_proxy::web;

#[derive(Parser, Debug)]
#[command(name = "paraph-proxy")]
#[command(about = "Proxy and UI server for a third-party paraphrasing API", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (YAML/JSON/TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Run the proxy server (default)
    Run,
    /// Check configuration and credential presence
    Check {
        /// Send one real paraphrase request upstream
        #[arg(long)]
        probe: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("paraph_proxy={log_level},warp=info")));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if args.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = match args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            config::load_from_path(&path).await.map_err(|e| {
                error!(
                    "Failed to load configuration from {}: {}",
                    path.display(),
                    e
                );
                e
            })?
        }
        None => {
            info!("Loading configuration from default locations");
            config::load_from_env_or_file().await.map_err(|e| {
                error!("Failed to load configuration: {}", e);
                e
            })?
        }
    };

    if let Command::Check { probe } = args.command.unwrap_or(Command::Run) {
        return commands::run_config_check(config, probe).await;
    }

    info!("Starting paraph-proxy");
    info!("Forwarding to {}", config.upstream.url);
    if config.upstream.api_key().is_none() {
        warn!(
            "{} is not set; paraphrase requests will fail until it is configured",
            config::API_KEY_ENV
        );
    }
    match &config.server.static_dir {
        Some(dir) => info!("Serving UI from {}", dir.display()),
        None => info!("No static directory configured; serving the API only"),
    }

    let (state, _shutdown_rx) = AppState::new(config)?;

    let shutdown_state = state.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal");
                shutdown_state.shutdown();
            }
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    web::start_server(state).await
}
