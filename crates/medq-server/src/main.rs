use std::{env, sync::Arc};

use medq_db_memory::InMemoryStore;
use medq_notifications::HttpNotificationSink;
use medq_queue::QueueService;
use medq_server::config::load_config;
use medq_server::state::AppState;
use medq_server::{observability, seed, server};

/// How the configuration path was determined.
#[derive(Debug, Clone, Copy)]
enum ConfigSource {
    /// From --config CLI argument
    CliArgument,
    /// From MEDQ_CONFIG environment variable
    EnvironmentVariable,
    /// Default path (medq.toml)
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable (MEDQ_CONFIG)"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present; optional for local development.
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    // Initialize tracing early with the default level.
    observability::init_tracing();

    let (config_path, source) = resolve_config_path();

    let cfg = match load_config(Some(&config_path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    tracing::info!(
        path = %config_path,
        source = %source,
        "Configuration loaded"
    );

    observability::apply_logging_level(&cfg.logging.level);

    let offset = cfg.queue.utc_offset();
    let store = Arc::new(InMemoryStore::with_offset(offset));

    let categories = seed::apply(&store, &cfg.seed);
    tracing::info!(
        categories = categories.len(),
        counters = cfg.seed.counters.len(),
        patients = cfg.seed.patients.len(),
        "Seed data applied"
    );

    let sink = Arc::new(HttpNotificationSink::new(
        cfg.notifications.sms_gateway_url.clone().unwrap_or_default(),
    ));

    let service = Arc::new(
        QueueService::new(store.clone(), store.clone(), store.clone(), sink)
            .with_day_offset(offset),
    );

    let app = server::build_app(AppState::new(service));
    let addr = cfg.addr();
    tracing::info!(%addr, "Starting server");

    if let Err(err) = server::serve(addr, app).await {
        eprintln!("Server error: {err}");
        std::process::exit(1);
    }
}

/// Resolve the configuration file path.
///
/// Priority order:
/// 1. CLI argument: --config <path>
/// 2. Environment variable: MEDQ_CONFIG
/// 3. Default: medq.toml
fn resolve_config_path() -> (String, ConfigSource) {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return (path, ConfigSource::CliArgument);
            }
        }
    }

    if let Ok(path) = env::var("MEDQ_CONFIG") {
        if !path.is_empty() {
            return (path, ConfigSource::EnvironmentVariable);
        }
    }

    ("medq.toml".to_string(), ConfigSource::Default)
}
