// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream access and activity views.

pub mod route;
pub mod search;
pub mod strava;

pub use route::RouteError;
pub use search::filter_by_name;
pub use strava::StravaClient;
