// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for fetching activities.
//!
//! Every upstream failure (transport error, non-2xx status, undecodable
//! body) stops here: listing yields an empty vector and detail lookup yields
//! `None`. Handlers therefore never see a Strava error, and a 404 from this
//! service can mean either "no such activity" or "Strava was unreachable".
//!
//! Each request runs in its own task, so it completes even if the inbound
//! caller disconnects and the handler future is dropped.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{DetailedActivity, SummaryActivity};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Number of recent activities fetched for a search (a single page).
pub const RECENT_ACTIVITIES_PAGE_SIZE: u32 = 50;

/// Strava API client. Shared between handlers through `AppState`.
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl StravaClient {
    /// Create a client using the configured base URL, token and timeout.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.strava_api_base_url.clone(),
            access_token: config.strava_access_token.clone(),
        })
    }

    /// List the athlete's most recent activities, newest first.
    ///
    /// Returns an empty list on any upstream failure. Entries that fail to
    /// decode are skipped individually.
    pub async fn list_recent_activities(&self) -> Vec<SummaryActivity> {
        let url = format!("{}/athlete/activities", self.base_url);
        let query = [("per_page", RECENT_ACTIVITIES_PAGE_SIZE.to_string())];

        let entries: Vec<serde_json::Value> = match self.get_json(&url, &query).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to list recent activities");
                return Vec::new();
            }
        };

        let total = entries.len();
        let activities: Vec<SummaryActivity> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<SummaryActivity>(entry) {
                Ok(activity) if activity.id > 0 => Some(activity),
                Ok(_) => {
                    tracing::warn!("Skipping activity with invalid id");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable activity");
                    None
                }
            })
            .collect();

        tracing::debug!(total, decoded = activities.len(), "Fetched recent activities");
        activities
    }

    /// Get a single activity by ID.
    ///
    /// Returns `None` on any upstream failure, not only a true 404.
    pub async fn get_activity_detail(&self, activity_id: u64) -> Option<DetailedActivity> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);

        match self.get_json::<DetailedActivity>(&url, &[]).await {
            Ok(activity) if activity.summary.id > 0 => Some(activity),
            Ok(_) => {
                tracing::warn!(activity_id, "Activity payload has invalid id");
                None
            }
            Err(e) => {
                tracing::warn!(activity_id, error = %e, "Failed to get activity");
                None
            }
        }
    }

    /// Release the connection pool.
    pub fn close(self) {
        drop(self.http);
        tracing::info!("Strava client closed");
    }

    /// Generic authenticated GET request with JSON response.
    async fn get_json<T: DeserializeOwned + Send + 'static>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let request = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query);

        tokio::spawn(async move {
            let response = request
                .send()
                .await
                .map_err(|e| AppError::StravaApi(e.to_string()))?;
            check_response_json(response).await
        })
        .await
        .map_err(|e| AppError::StravaApi(format!("Request task failed: {}", e)))?
    }
}

/// Check response status and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        return Err(AppError::StravaApi(match status.as_u16() {
            401 => "access token rejected (401)".to_string(),
            429 => "rate limit exceeded (429)".to_string(),
            _ => format!("HTTP {}: {}", status, body),
        }));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
}
