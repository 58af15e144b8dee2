// ABOUTME: HTTP server binary for the HubSpot integration bridge
// ABOUTME: Loads configuration, wires cache and routes, and serves until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Integration Server Binary
//!
//! Serves the HubSpot connect flow and contact loading routes.

use anyhow::{Context, Result};
use clap::Parser;
use integration_bridge::{
    cache::{Cache, CacheConfig, CacheProvider},
    config::ServerConfig,
    logging,
    resources::ServerResources,
    routes,
    utils::http_client::initialize_shared_client,
};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "integration-server")]
#[command(about = "HubSpot CRM integration bridge - OAuth connect flow and contact loading")]
struct Args {
    /// Override HTTP port (the default redirect URI still follows `HTTP_PORT`)
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG and friends may come from .env
    dotenvy::dotenv().ok();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    initialize_shared_client(config.http_client);

    let cache = Cache::new(CacheConfig::from(&config.cache)).await?;
    info!(backend = cache.backend_name(), "Cache ready");

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(config, cache));
    let app = routes::router(resources);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Integration server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Integration server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
