//! Application entry point for the `tempmap` service.
//!
//! This binary orchestrates the startup sequence for the temperature map:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Building the fetch pipeline (client, location table, reading cache)
//! - Mounting all routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `WEATHER_API_URL`, `CACHE_TTL_SECS`, `HTTP_TIMEOUT_SECS`, `LISTEN_PORT`
//!   (all optional, see `config`)
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use anyhow::Result;

use tempmap::{routes, Pipeline, WeatherClient, LOCATIONS};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = tempmap::load_from_env()?;
    cfg.log_config();

    let client = WeatherClient::new(cfg.api_url.clone(), cfg.http_timeout())
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
    tracing::debug!("Weather client targets {}", client.base_url());
    let pipeline = Arc::new(Pipeline::new(client, LOCATIONS.to_vec(), cfg.cache_ttl()));

    tracing::info!("Serving {} locations", pipeline.locations().len());

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(pipeline);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.listen_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Install the global `tracing` subscriber. Call once, before any logging.
///
/// `RUST_LOG` wins when set; otherwise `AXUM_LOG_LEVEL` picks the level.
/// `AXUM_SPAN_EVENTS` (`full` | `enter_exit`) and `FORCE_COLOR` tune output.
fn init_tracing() {
    // ---
    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(log_directive(env::var("AXUM_LOG_LEVEL").ok().as_deref()))
    };

    let force_color = env::var("FORCE_COLOR").ok();
    let use_color = color_enabled(force_color.as_deref(), std::io::stdout().is_terminal());

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events(env::var("AXUM_SPAN_EVENTS").ok().as_deref()))
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}

/// Span lifecycle events to emit; close-only unless asked otherwise.
fn span_events(mode: Option<&str>) -> FmtSpan {
    match mode {
        Some("full") => FmtSpan::FULL,
        Some("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    }
}

/// An explicit `FORCE_COLOR` overrides TTY detection.
fn color_enabled(force: Option<&str>, is_tty: bool) -> bool {
    match force {
        Some("1" | "true" | "yes") => true,
        Some("0" | "false" | "no") => false,
        _ => is_tty,
    }
}

/// Filter directive for a level name; unknown names fall back to `debug`.
/// HTTP plumbing stays at `info` so per-request wire chatter is hidden.
fn log_directive(level: Option<&str>) -> String {
    let level = match level {
        Some(l @ ("trace" | "debug" | "info" | "warn" | "error")) => l,
        _ => "debug",
    };
    format!("{level},hyper=info,hyper_util=info,reqwest=info")
}
