//! Octagon prediction server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the prediction API over HTTP.
//!
//! # Sample data
//!
//! To populate an empty store with a small historical roster:
//!
//! ```
//! cargo run -p octagon-api --bin server -- --seed
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use clap::Parser;
use octagon_api::ServerConfig;
use octagon_engine::{PredictionEngine, ProcessScorer};
use octagon_store_sqlite::{SqliteStore, seed::seed_sample_data};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Octagon fight prediction server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Seed the store with sample fighters and fights if it is empty.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 3000)?
    .set_default("store_path", "octagon.db")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("OCTAGON"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  if cli.seed {
    let seeded = seed_sample_data(&store)
      .await
      .context("failed to seed sample data")?;
    if !seeded {
      tracing::info!("store already populated, skipping seed");
    }
  }

  // Build the engine, with the external scorer if one is configured.
  let engine = match &server_cfg.scorer_command {
    Some(command) => {
      let mut scorer = ProcessScorer::new(command);
      if let Some(secs) = server_cfg.scorer_timeout_secs {
        scorer = scorer.with_timeout(Duration::from_secs(secs));
      }
      tracing::info!(command = %command.display(), "external scorer enabled");
      Arc::new(PredictionEngine::with_scorer(store, scorer))
    }
    None => {
      tracing::info!("no external scorer configured, fallback only");
      Arc::new(PredictionEngine::new(store))
    }
  };

  let app = axum::Router::new()
    .nest("/api", octagon_api::api_router(engine))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
