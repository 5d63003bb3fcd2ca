// SPDX-License-Identifier: MIT

//! Stations and cycle slots parsed from list responses.

use crate::html::Form;

/// A physical docking station, rebuilt from every parking-list response.
#[derive(Debug, Clone)]
pub struct ParkingStation {
    /// Portal parking id (numeric-looking string; see the H1-Area
    /// exception in the directory generator)
    pub id: String,
    /// Display name, e.g. "A1-01.Chiyoda City Office"
    pub name: String,
    /// Availability text as rendered, e.g. "3 available"
    pub availability: String,
    /// The raw form block, carrying the fields follow-up requests need
    pub form: Form,
}

/// One reservable attachment point, parsed fresh per cycle-list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSlot {
    pub cycle_id: String,
    pub attach_id: String,
}
