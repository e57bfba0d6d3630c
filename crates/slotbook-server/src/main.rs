//! Slotbook scheduling server
//!
//! Multi-tenant appointment scheduling: recurring weekly availability
//! templates, per-date slot resolution, and single-winner booking commits.
//!
//! Usage:
//! ```bash
//! # In-memory stores with a seeded dev tenant
//! slotbook-server --seed-tenant barbershop-01
//!
//! # Durable SQLite storage from a config file
//! slotbook-server --config slotbook.yaml
//! ```
//!
//! Test with:
//! ```bash
//! curl 'http://localhost:3000/api/availability?date=2025-03-03' \
//!   -H 'x-slotbook-tenant: barbershop-01'
//!
//! curl http://localhost:3000/api/bookings \
//!   -H 'x-slotbook-tenant: barbershop-01' \
//!   -H 'Content-Type: application/json' \
//!   -d '{"date":"2025-03-03","time":"09:00","customerName":"Ada","service":"Trim"}'
//! ```

mod bootstrap;
mod config;

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use slotbook_core::TenantId;
use slotbook_ingress::{AppState, router};

#[derive(Parser, Debug)]
#[command(name = "slotbook-server", about = "Multi-tenant appointment scheduling server")]
struct Cli {
    /// Path to a YAML or TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Seed a tenant with a default weekday template (dev convenience)
    #[arg(long)]
    seed_tenant: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("loading config {}: {}", path.display(), e))?,
        None => ServerConfig::default(),
    };
    config.merge_env();

    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let (directory, ledger) = bootstrap::build_stores(&config).await?;
    let relay = bootstrap::build_relay(&config)?;

    if let Some(seed) = &cli.seed_tenant {
        let tenant = TenantId::parse(seed).context("invalid --seed-tenant")?;
        bootstrap::seed_tenant(&directory, &tenant).await?;
    }

    let state = AppState::new(directory, ledger, relay);
    let app = router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "slotbook server listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
