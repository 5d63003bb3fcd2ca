// SPDX-License-Identifier: MIT

//! Reservation workflow on top of the protocol client.
//!
//! Sequences check-status, list-cycles, reserve, and confirm. The portal
//! never confirms a reservation synchronously and may drop one silently
//! (or another user may win the race), so reservation is a bounded
//! best-effort loop: post, re-check status, repeat until the status flips
//! or the attempt budget runs out. All other failures propagate
//! immediately; nothing here retries login or listing.

use rand::seq::SliceRandom;

use crate::error::Result;
use crate::html;
use crate::models::{CycleSlot, UserStatus};
use crate::services::PortalClient;

/// Default reservation attempt budget.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// How a reservation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// Status was already non-neutral before any attempt; nothing posted.
    AlreadyHeld,
    /// Status flipped after one of our reserve posts.
    Reserved,
    /// The station had no reservable cycles.
    NoCycles,
    /// Attempt budget exhausted with status still neutral.
    Exhausted,
}

/// Drives the login → check-status → list → reserve → confirm sequence.
pub struct ReservationService {
    portal: PortalClient,
}

impl ReservationService {
    pub fn new(portal: PortalClient) -> Self {
        Self { portal }
    }

    /// Read access to the underlying client and its session.
    pub fn portal(&self) -> &PortalClient {
        &self.portal
    }

    /// Re-query and classify the user status.
    pub async fn refresh_status(&mut self) -> Result<UserStatus> {
        self.portal.refresh_status().await
    }

    /// Reservable slots at one station.
    pub async fn cycle_list(&mut self, parking_id: &str) -> Result<Option<Vec<CycleSlot>>> {
        self.portal.fetch_cycle_list(parking_id).await
    }

    /// Try to reserve any cycle at the station.
    ///
    /// Issues at most `max_attempts + 1` reserve posts. Each attempt
    /// re-fetches the slot list (it changes under us), picks one slot
    /// uniformly at random, posts the reservation, and re-checks status;
    /// a non-neutral status is the only success signal the portal gives.
    /// Never posts a reservation while the status is non-neutral.
    pub async fn reserve_at_station(
        &mut self,
        parking_id: &str,
        max_attempts: u32,
    ) -> Result<ReserveOutcome> {
        if self.portal.refresh_status().await? != UserStatus::Neutral {
            return Ok(ReserveOutcome::AlreadyHeld);
        }

        for attempt in 0..=max_attempts {
            let slots = match self.portal.fetch_cycle_list(parking_id).await? {
                Some(slots) if !slots.is_empty() => slots,
                _ => return Ok(ReserveOutcome::NoCycles),
            };
            let Some(slot) = slots.choose(&mut rand::thread_rng()) else {
                return Ok(ReserveOutcome::NoCycles);
            };
            tracing::info!(
                attempt,
                cycle = %slot.cycle_id,
                attach = %slot.attach_id,
                "Posting reservation"
            );
            self.portal.reserve(&slot.cycle_id, &slot.attach_id).await?;

            if self.portal.refresh_status().await? != UserStatus::Neutral {
                return Ok(ReserveOutcome::Reserved);
            }
        }
        tracing::warn!(max_attempts, "Reservation attempts exhausted");
        Ok(ReserveOutcome::Exhausted)
    }

    /// Plain-text description of the current reservation or rental,
    /// `None` when the account holds nothing.
    pub async fn describe_reservation(&mut self) -> Result<Option<String>> {
        let status = self.portal.refresh_status().await?;
        if !status.holds_cycle() {
            return Ok(None);
        }
        let fragment = html::parse_user_status(self.portal.session().last_body());
        Ok(fragment.map(|f| html::strip_tags(&f).trim().to_string()))
    }

    /// Cancel the current reservation.
    ///
    /// Gated on the last-known status being `Reserved` (an in-use rental
    /// cannot be cancelled). Returns whether a cancel was actually posted.
    pub async fn cancel_reservation(&mut self) -> Result<bool> {
        if self.portal.session().status() != UserStatus::Reserved {
            return Ok(false);
        }
        self.portal.cancel().await?;
        Ok(true)
    }
}
