// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod stats;

pub use activity::{Athlete, DetailedActivity, RouteMap, SummaryActivity};
pub use stats::ActivityStats;
