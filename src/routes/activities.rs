// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity search and lookup routes.

use crate::error::{AppError, Result};
use crate::models::{ActivityStats, DetailedActivity, SummaryActivity};
use crate::services::{filter_by_name, route::route_feature};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities/search", get(search_activities))
        .route("/activities/{activity_id}", get(get_activity))
        .route("/activities/{activity_id}/stats", get(get_activity_stats))
        .route("/activities/{activity_id}/route", get(get_activity_route))
}

// ─── Search ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchQuery {
    /// Case-insensitive substring of the activity name
    #[serde(default)]
    q: Option<String>,
}

/// Search recent activities by name.
///
/// Always 200 for a non-blank query, even when Strava is unavailable.
async fn search_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SummaryActivity>>> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Search query cannot be empty".to_string(),
        ));
    }

    let recent = state.strava.list_recent_activities().await;
    let matches = filter_by_name(recent, &query);

    tracing::debug!(query = %query, matches = matches.len(), "Activity search");
    Ok(Json(matches))
}

// ─── Detail ──────────────────────────────────────────────────

/// Look up an activity. Ids that can't exist (zero or negative) are simply
/// not found, the same answer Strava would give.
async fn fetch_activity(state: &AppState, activity_id: i64) -> Result<DetailedActivity> {
    let not_found = || AppError::NotFound(format!("Activity {} not found", activity_id));

    let id = u64::try_from(activity_id)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(not_found)?;

    state
        .strava
        .get_activity_detail(id)
        .await
        .ok_or_else(not_found)
}

/// Get a single activity.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<Json<DetailedActivity>> {
    Ok(Json(fetch_activity(&state, activity_id).await?))
}

/// Get performance statistics for a single activity.
async fn get_activity_stats(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<Json<ActivityStats>> {
    let activity = fetch_activity(&state, activity_id).await?;
    Ok(Json(ActivityStats::from(&activity)))
}

/// Get the route of a single activity as a GeoJSON feature.
async fn get_activity_route(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<Json<geojson::Feature>> {
    let activity = fetch_activity(&state, activity_id).await?;

    let feature = route_feature(&activity).map_err(|e| {
        tracing::debug!(activity_id, error = %e, "No route for activity");
        AppError::NotFound(format!("Route for activity {} not available", activity_id))
    })?;

    Ok(Json(feature))
}
