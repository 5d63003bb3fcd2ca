// SPDX-License-Identifier: MIT

//! One-shot generator for the parking directory.
//!
//! Logs in, sweeps the parking-list event across the area table, and
//! writes the name → id map consumed by the poller. Run this once (or
//! whenever the portal adds stations); the poller only reads the file.

use anyhow::Context;
use docycle::{
    config::Config,
    models::area,
    services::{ParkingDirectory, PortalClient},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docycle=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let mut portal = PortalClient::login(&config).await.context("portal login")?;
    tracing::info!("Portal login complete");

    let directory = ParkingDirectory::generate(&mut portal, area::sweep_area_ids()).await?;
    directory.save_to_file(&config.parking_directory)?;
    tracing::info!(
        entries = directory.len(),
        path = %config.parking_directory,
        "Parking directory written"
    );
    Ok(())
}
