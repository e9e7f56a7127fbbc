// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route geometry: decode an activity polyline into a GeoJSON feature.

use crate::models::DetailedActivity;
use geo::{BoundingRect, LineString};
use geojson::{feature::Id, Feature, Geometry, JsonObject};

/// Strava encodes polylines with 5 decimal digits of precision.
const POLYLINE_PRECISION: u32 = 5;

/// Decode an encoded polyline (Strava format). Coordinates are (lng, lat).
pub fn decode_route(encoded: &str) -> Result<LineString<f64>, RouteError> {
    polyline::decode_polyline(encoded, POLYLINE_PRECISION)
        .map_err(|e| RouteError::PolylineError(e.to_string()))
}

/// Build a GeoJSON `Feature` for an activity's route.
///
/// Uses the full-resolution polyline when present, else the summary one.
pub fn route_feature(activity: &DetailedActivity) -> Result<Feature, RouteError> {
    let summary = &activity.summary;
    let encoded = activity.polyline().ok_or(RouteError::NoPolyline)?;
    let line = decode_route(encoded)?;
    let bounds = line.bounding_rect().ok_or(RouteError::EmptyRoute)?;

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), summary.id.into());
    properties.insert("name".to_string(), summary.name.clone().into());
    properties.insert("sport_type".to_string(), summary.sport_type.clone().into());
    properties.insert("distance".to_string(), summary.distance.into());

    tracing::debug!(
        activity_id = summary.id,
        points = line.0.len(),
        "Decoded activity route"
    );

    Ok(Feature {
        bbox: Some(vec![
            bounds.min().x,
            bounds.min().y,
            bounds.max().x,
            bounds.max().y,
        ]),
        geometry: Some(Geometry::new(geojson::Value::from(&line))),
        id: Some(Id::Number(summary.id.into())),
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Errors from route decoding.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Activity has no polyline")]
    NoPolyline,

    #[error("Activity polyline has no points")]
    EmptyRoute,

    #[error("Failed to decode polyline: {0}")]
    PolylineError(String),
}
