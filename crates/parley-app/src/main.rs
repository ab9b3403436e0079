//! Parley application binary - composition root.
//!
//! Ties the Parley crates together into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Open the SQLite database under the data directory
//! 4. Build the knowledge base and response generator
//! 5. Serve the axum REST API (or answer one utterance with `ask`)

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use parley_api::routes;
use parley_api::state::AppState;
use parley_chat::{KnowledgeBase, ResponseGenerator};
use parley_core::config::ParleyConfig;
use parley_storage::{Database, MessageRepository};

use cli::{CliArgs, Command};

/// Expand a leading `~/` to the user's home directory.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if let Some(rest) = data_dir.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(data_dir)
    }
}

/// Where the effective configuration came from.
#[derive(Debug, PartialEq, Eq)]
enum ConfigSource {
    File,
    Missing,
    Invalid(String),
}

/// Load the config file, falling back to defaults when it is absent or bad.
///
/// Runs before tracing is installed, so the outcome is returned for the
/// caller to log.
fn load_config(path: &Path) -> (ParleyConfig, ConfigSource) {
    if !path.exists() {
        return (ParleyConfig::default(), ConfigSource::Missing);
    }
    match ParleyConfig::load(path) {
        Ok(config) => (config, ConfigSource::File),
        Err(e) => (ParleyConfig::default(), ConfigSource::Invalid(e.to_string())),
    }
}

/// Reply to a single utterance against a throwaway in-memory store.
async fn ask_reply(
    knowledge: Arc<KnowledgeBase>,
    utterance: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let db = Arc::new(Database::in_memory()?);
    let retriever = Arc::new(MessageRepository::new(db));
    let generator = ResponseGenerator::new(knowledge, retriever);

    let reply = generator.generate_reply(utterance, Uuid::new_v4()).await?;
    Ok(reply.text)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let (mut config, config_source) = load_config(&config_file);
    if let Some(dir) = args.resolve_data_dir() {
        config.general.data_dir = dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }
    config.server.host = args.resolve_host(&config.server.host);
    config.server.port = args.resolve_port(config.server.port);

    // Tracing. RUST_LOG wins over the resolved level. Logs go to stderr so
    // `ask` output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Parley v{}", env!("CARGO_PKG_VERSION"));
    match &config_source {
        ConfigSource::File => {
            tracing::info!(path = %config_file.display(), "Configuration loaded")
        }
        ConfigSource::Missing => {
            tracing::info!(path = %config_file.display(), "No configuration file, using defaults")
        }
        ConfigSource::Invalid(error) => tracing::warn!(
            path = %config_file.display(),
            error = %error,
            "Invalid configuration file, using defaults"
        ),
    }

    // Loaded once and shared read-only by every request.
    let knowledge = Arc::new(KnowledgeBase::builtin());

    if let Some(Command::Ask { utterance }) = args.command {
        let reply = ask_reply(knowledge, &utterance.join(" ")).await?;
        println!("{}", reply);
        return Ok(());
    }

    // Storage.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }

    let db_path = data_dir.join("parley.db");
    let db = Database::new(&db_path)?;
    tracing::info!(path = %db_path.display(), "SQLite database opened");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, db, knowledge);
    let router = routes::create_router(state);

    // === API server ===

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind - is another instance running?");
            tracing::error!("Try: parley --port <other port>");
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "API server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
