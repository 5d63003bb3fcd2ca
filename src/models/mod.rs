// SPDX-License-Identifier: MIT

//! Data models for the portal client.

pub mod area;
pub mod parking;
pub mod status;

pub use parking::{CycleSlot, ParkingStation};
pub use status::UserStatus;
