// SPDX-License-Identifier: MIT

//! docycle poller
//!
//! Watches one parking station and, when availability drops below the
//! configured threshold, races to reserve a cycle and notifies the owner.
//! One session, one sequential loop; any portal error ends the process
//! (recovery is a restart, which performs a fresh login).

use std::time::Duration;

use anyhow::Context;
use docycle::{
    config::Config,
    services::{
        NotifyClient, ParkingDirectory, PortalClient, ReservationService, ReserveOutcome,
        DEFAULT_MAX_ATTEMPTS,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("loading configuration")?;
    let parking_id = resolve_parking_id(&config)?;
    tracing::info!(
        parking_id = %parking_id,
        threshold = config.reserve_threshold,
        interval_secs = config.poll_interval_secs,
        "Starting availability watch"
    );

    let portal = PortalClient::login(&config).await.context("portal login")?;
    tracing::info!("Portal login complete");
    let mut service = ReservationService::new(portal);
    let notify = NotifyClient::new(config.notify_url.clone(), config.notify_token.clone());

    let interval = Duration::from_secs(config.poll_interval_secs);
    loop {
        tokio::time::sleep(interval).await;

        match service.cycle_list(&parking_id).await? {
            None => {
                tracing::info!("Station returned no cycle forms");
                if let Err(err) = notify.send_message("nothing").await {
                    tracing::warn!(error = %err, "Notification failed");
                }
            }
            Some(cycles) if cycles.len() < config.reserve_threshold => {
                tracing::info!(available = cycles.len(), "Below threshold, trying to reserve");
                let outcome = service
                    .reserve_at_station(&parking_id, DEFAULT_MAX_ATTEMPTS)
                    .await?;
                match outcome {
                    ReserveOutcome::AlreadyHeld | ReserveOutcome::Reserved => {
                        let message = service
                            .describe_reservation()
                            .await?
                            .unwrap_or_else(|| "Reservation held".to_string());
                        tracing::info!(message = %message, "Reservation secured, exiting");
                        notify
                            .send_message(&message)
                            .await
                            .context("final notification")?;
                        return Ok(());
                    }
                    outcome => {
                        tracing::info!(?outcome, "Reservation did not land, keep polling");
                    }
                }
            }
            Some(cycles) => {
                tracing::debug!(available = cycles.len(), "Above threshold");
            }
        }
    }
}

/// Resolve the watched station: explicit id wins, otherwise look the
/// configured name up in the generated directory.
fn resolve_parking_id(config: &Config) -> anyhow::Result<String> {
    if let Some(id) = &config.parking_id {
        return Ok(id.clone());
    }
    let name = config
        .parking_name
        .as_ref()
        .context("set PARKING_ID or PARKING_NAME")?;
    let directory = ParkingDirectory::load_from_file(&config.parking_directory)?;
    directory
        .get(name)
        .map(str::to_string)
        .with_context(|| {
            format!(
                "parking {:?} not found in {}",
                name, config.parking_directory
            )
        })
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docycle=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
