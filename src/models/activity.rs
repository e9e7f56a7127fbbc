// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity records, mirroring the upstream JSON shape.
//!
//! These are decoded straight from Strava responses and serialized back out
//! to API clients unchanged. Fields we don't surface are ignored on decode.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Athlete embedded in an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Athlete {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

/// Activity map data with polylines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteMap {
    /// Simplified route, present on list and detail payloads
    #[serde(default)]
    pub summary_polyline: Option<String>,
    /// Full-resolution route, only on detail payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
}

/// Activity as returned by the athlete activity list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SummaryActivity {
    /// Strava activity ID
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    /// Activity name/title
    pub name: String,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub moving_time: u64,
    /// Elevation gain in meters
    pub total_elevation_gain: f64,
    /// Sport type (Ride, Run, Hike, etc.)
    pub sport_type: String,
    /// Local start time, passed through as Strava formats it
    pub start_date_local: String,
    #[serde(default)]
    pub map: RouteMap,
    #[serde(default)]
    pub athlete: Option<Athlete>,
}

/// Detailed activity: the summary fields plus optional performance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DetailedActivity {
    #[serde(flatten)]
    pub summary: SummaryActivity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Elapsed time in seconds, including stops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub elapsed_time: Option<u64>,
    /// Meters per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heartrate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heartrate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_watts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilojoules: Option<f64>,
}

impl DetailedActivity {
    /// Get the detailed polyline, falling back to summary if not available.
    pub fn polyline(&self) -> Option<&str> {
        let map = &self.summary.map;
        map.polyline
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(map.summary_polyline.as_deref().filter(|p| !p.is_empty()))
    }
}
