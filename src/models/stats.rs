// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-activity performance statistics derived from a detailed activity.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::DetailedActivity;

/// Statistics view of a single activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityStats {
    /// Meters
    pub distance: f64,
    /// Meters
    pub elevation_gain: f64,
    /// Seconds
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub moving_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub elapsed_time: Option<u64>,
    /// Meters per second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heartrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heartrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_watts: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilojoules: Option<f64>,
}

impl From<&DetailedActivity> for ActivityStats {
    fn from(activity: &DetailedActivity) -> Self {
        let summary = &activity.summary;

        // Strava omits average_speed on some manual entries
        let average_speed = activity.average_speed.or_else(|| {
            (summary.moving_time > 0).then(|| summary.distance / summary.moving_time as f64)
        });

        Self {
            distance: summary.distance,
            elevation_gain: summary.total_elevation_gain,
            moving_time: summary.moving_time,
            elapsed_time: activity.elapsed_time,
            average_speed,
            max_speed: activity.max_speed,
            average_heartrate: activity.average_heartrate,
            max_heartrate: activity.max_heartrate,
            average_watts: activity.average_watts,
            kilojoules: activity.kilojoules,
        }
    }
}
