// SPDX-License-Identifier: MIT

//! Services module - protocol client and the flows built on it.

pub mod directory;
pub mod notify;
pub mod portal;
pub mod reservation;

pub use directory::ParkingDirectory;
pub use notify::{NotifyClient, NotifyError};
pub use portal::{PortalClient, Session};
pub use reservation::{ReservationService, ReserveOutcome, DEFAULT_MAX_ATTEMPTS};
