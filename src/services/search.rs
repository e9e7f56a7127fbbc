// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side activity search.
//!
//! Strava has no search endpoint, so searching means filtering the most
//! recent page of activities by name.

use crate::models::SummaryActivity;

/// Keep the activities whose name contains `query`, ignoring case.
///
/// Upstream order (newest first) is preserved. The query is matched as
/// given; callers reject blank queries before getting here.
pub fn filter_by_name(activities: Vec<SummaryActivity>, query: &str) -> Vec<SummaryActivity> {
    let needle = query.to_lowercase();
    activities
        .into_iter()
        .filter(|a| a.name.to_lowercase().contains(&needle))
        .collect()
}
