//! Presence bridge entry point
//!
//! Run with:
//! ```bash
//! cargo run -p bridge-runtime --bin presence-bridge
//! ```
//!
//! Host messages are read from stdin and proximity commands written to stdout, one JSON
//! object per line. Configuration is loaded from environment variables; logs go to stderr.

use bridge_common::{try_init_tracing_with_config, AppConfig, AppResult, ConfigError, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // Initialize tracing
    let tracing_config = config
        .as_ref()
        .map(|config| TracingConfig::for_environment(config.app.env))
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, code = e.error_code(), "Presence bridge failed");
        std::process::exit(1);
    }
}

async fn run(config: Result<AppConfig, ConfigError>) -> AppResult<()> {
    let config = config.map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        graph = %config.graph.base_url,
        poll_interval_ms = config.presence.poll_interval_ms,
        "Presence bridge started"
    );

    bridge_runtime::run(config).await
}
