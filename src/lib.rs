// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava Route Viewer: read-only activity search and lookup
//!
//! This crate provides a small backend API that proxies a single athlete's
//! Strava activities, adding name search and route geometry on top.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::StravaClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub strava: StravaClient,
}
