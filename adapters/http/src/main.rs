#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! HTTP adapter that exposes the Rover Mission world to mission control.
//!
//! Startup loads the mission configuration, constructs the world once, and
//! serves command batches over a small JSON API. Construction failures abort
//! the process: there is no partially initialized service.

mod api;
mod config;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use config::{Cli, MissionConfig};
use rover_mission_world::World;

/// Entry point for the Rover Mission HTTP service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rover_mission_http=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mission = MissionConfig::load(cli.config.as_deref())?;
    let port = mission.server.resolved_port(cli.port)?;

    let world = World::from_setup(mission.world_setup()).context("world construction failed")?;
    info!(
        width = mission.grid.width,
        height = mission.grid.height,
        "world constructed"
    );

    let app = api::router(api::AppState::new(world));

    let addr = format!("0.0.0.0:{port}");
    info!("starting rover mission service on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
