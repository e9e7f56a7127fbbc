// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use strava_route_viewer::config::Config;
use strava_route_viewer::routes::create_router;
use strava_route_viewer::services::StravaClient;
use strava_route_viewer::AppState;

/// Canned reply from the stub upstream.
#[derive(Clone)]
#[allow(dead_code)]
pub enum Reply {
    Json(Value),
    Status(u16),
    /// 200 with a body that is not valid JSON for the endpoint
    Raw(&'static str),
    /// Wait, then send the inner reply
    Delayed(Duration, Box<Reply>),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(value) => Json(value).into_response(),
            Reply::Status(code) => (
                StatusCode::from_u16(code).expect("valid status code"),
                Json(json!({ "message": "stub error" })),
            )
                .into_response(),
            Reply::Raw(body) => {
                ([(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            Reply::Delayed(_, inner) => (*inner).into_response(),
        }
    }
}

/// What the stub upstream answers on each endpoint.
#[derive(Clone)]
#[allow(dead_code)]
pub struct Upstream {
    pub activities: Reply,
    pub detail: Reply,
    /// Authorized requests answered so far (counted after any delay)
    pub completed: Arc<AtomicUsize>,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            activities: Reply::Json(json!([])),
            detail: Reply::Status(404),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }
}

async fn respond(upstream: &Upstream, reply: Reply) -> Response {
    let reply = match reply {
        Reply::Delayed(delay, inner) => {
            tokio::time::sleep(delay).await;
            *inner
        }
        other => other,
    };
    upstream.completed.fetch_add(1, Ordering::SeqCst);
    reply.into_response()
}

fn authorized(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", token))
}

async fn list_activities(
    State(upstream): State<Arc<Upstream>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers, &Config::test_default().strava_access_token) {
        return Reply::Status(401).into_response();
    }
    if params.get("per_page").map(String::as_str) != Some("50") {
        return Reply::Status(400).into_response();
    }
    respond(&upstream, upstream.activities.clone()).await
}

async fn get_activity(State(upstream): State<Arc<Upstream>>, headers: HeaderMap) -> Response {
    if !authorized(&headers, &Config::test_default().strava_access_token) {
        return Reply::Status(401).into_response();
    }
    respond(&upstream, upstream.detail.clone()).await
}

/// Start a stub Strava API on an ephemeral port. Returns its base URL.
#[allow(dead_code)]
pub async fn spawn_upstream(upstream: Upstream) -> String {
    let app = Router::new()
        .route("/athlete/activities", get(list_activities))
        .route("/activities/{id}", get(get_activity))
        .with_state(Arc::new(upstream));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub upstream");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Base URL of a port nothing is listening on.
#[allow(dead_code)]
pub async fn unreachable_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Create a test config pointed at the given upstream.
#[allow(dead_code)]
pub fn test_config(base_url: &str) -> Config {
    Config {
        strava_api_base_url: base_url.to_string(),
        ..Config::test_default()
    }
}

/// Create a test app talking to the given upstream.
#[allow(dead_code)]
pub fn create_test_app(base_url: &str) -> axum::Router {
    let config = test_config(base_url);
    let strava = StravaClient::new(&config).expect("Failed to build client");
    create_router(Arc::new(AppState { config, strava }))
}

/// Upstream-shaped activity summary.
#[allow(dead_code)]
pub fn activity_json(id: u64, name: &str) -> Value {
    json!({
        "resource_state": 2,
        "athlete": { "id": 134815, "resource_state": 1 },
        "id": id,
        "name": name,
        "distance": 5012.3,
        "moving_time": 1804,
        "elapsed_time": 1900,
        "total_elevation_gain": 31.0,
        "type": "Run",
        "sport_type": "Run",
        "start_date_local": "2024-05-04T07:01:11Z",
        "map": {
            "id": format!("a{}", id),
            "summary_polyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
            "resource_state": 2
        }
    })
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
