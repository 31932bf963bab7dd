//! Timetable HTTP Server Binary
//!
//! Main entry point for the timetable REST API server. It loads the export
//! configuration, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin timetable-server
//!
//! # With an explicit configuration file
//! TIMETABLE_CONFIG=/etc/timetable.toml cargo run --bin timetable-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `TIMETABLE_CONFIG`: Path of the configuration file (default: search for `timetable.toml`)
//! - `TIMETABLE_DELIVERY_SPACING_MS`, `TIMETABLE_FILE_NAMING`, `TIMETABLE_OUTPUT_DIR`: overrides
//! - `RUST_LOG`: Log filter directives, e.g. `timetable_export=debug` (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use timetable_export::config::ExportConfig;
use timetable_export::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting timetable HTTP server");

    let config = ExportConfig::load().context("loading export configuration")?;
    info!(
        "Exports go to {} every {:?} ({:?} naming)",
        config.output_dir().display(),
        config.delivery_spacing(),
        config.export.file_naming
    );

    let state = AppState::new(config).context("building application state")?;
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Filter from `RUST_LOG`-style directives, `info` when unset or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
