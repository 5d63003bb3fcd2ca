// SPDX-License-Identifier: MIT

//! docycle: watch a bicycle-share parking station and grab a cycle.
//!
//! This crate polls a session-based bicycle-share portal, scrapes its HTML
//! form fragments for station and cycle availability, reserves a cycle when
//! availability at a watched station drops below a threshold, and notifies
//! a human over a webhook. A companion binary generates the static parking
//! name → id directory the poller consumes.

pub mod config;
pub mod error;
pub mod html;
pub mod models;
pub mod services;
