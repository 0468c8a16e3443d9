//! SQLite Read-only MCP Server - Main entry point.
//!
//! Serves MCP tools for inspecting and querying one SQLite database over
//! stdin/stdout. Logs go to stderr so they never mix with protocol output.

use sqlite_readonly_mcp::config::Config;
use sqlite_readonly_mcp::mcp::DbService;
use sqlite_readonly_mcp::transport::{StdioTransport, Transport};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse_args();

    // Initialize logging
    init_tracing(&config);

    let database = config.database();
    info!(
        db_path = %database.display_path(),
        sample_limit = ?config.sample_limit_policy(),
        "Starting SQLite read-only MCP server v{}",
        env!("CARGO_PKG_VERSION")
    );
    if !database.path.is_file() {
        // Not fatal: each tool call reports the missing file itself.
        warn!(db_path = %database.display_path(), "Database file not found");
    }

    let transport = StdioTransport::new(DbService::from_config(&config));
    info!(transport = transport.name(), "Serving");

    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
