//! In-process stand-in for the forecast API.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tempmap::{Location, Pipeline, WeatherClient, LOCATIONS};

// ---

/// How the mock answers for one latitude.
#[derive(Debug, Clone)]
pub enum MockReply {
    Ok { temperature: f64, time: &'static str },
    Status(u16),
    Garbage,
    /// Never answers within any sane client timeout.
    Hang,
}

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    replies: Arc<HashMap<String, MockReply>>,
}

/// Running mock: its forecast URL and a count of requests received.
pub struct MockUpstream {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn lat_key(location: &Location) -> String {
    location.latitude.to_string()
}

pub fn location(name: &str) -> Location {
    *LOCATIONS
        .iter()
        .find(|l| l.name == name)
        .unwrap_or_else(|| panic!("unknown location {name}"))
}

async fn forecast(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<MockState>,
) -> Response {
    // ---
    state.hits.fetch_add(1, Ordering::SeqCst);

    if params.get("current").map(String::as_str) != Some("temperature_2m")
        || params.get("timezone").map(String::as_str) != Some("Asia/Tokyo")
        || !params.contains_key("longitude")
    {
        return (StatusCode::BAD_REQUEST, "missing parameters").into_response();
    }

    let reply = params
        .get("latitude")
        .and_then(|lat| state.replies.get(lat))
        .cloned()
        .unwrap_or(MockReply::Ok {
            temperature: 15.0,
            time: "2024-06-01T15:00",
        });

    match reply {
        MockReply::Ok { temperature, time } => Json(json!({
            "latitude": params.get("latitude"),
            "timezone": "Asia/Tokyo",
            "current_units": { "time": "iso8601", "temperature_2m": "°C" },
            "current": { "time": time, "interval": 900, "temperature_2m": temperature }
        }))
        .into_response(),
        MockReply::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        MockReply::Garbage => (StatusCode::OK, "<html>rate limited</html>").into_response(),
        MockReply::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
    }
}

/// Bind the mock on an ephemeral port. Unlisted latitudes answer 15 °C.
pub async fn spawn_upstream(replies: Vec<(Location, MockReply)>) -> MockUpstream {
    // ---
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockState {
        hits: Arc::clone(&hits),
        replies: Arc::new(
            replies
                .into_iter()
                .map(|(loc, reply)| (lat_key(&loc), reply))
                .collect(),
        ),
    };

    let app = Router::new()
        .route("/v1/forecast", get(forecast))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        url: format!("http://{addr}/v1/forecast"),
        hits,
    }
}

pub fn client_with_timeout(url: &str, timeout: Duration) -> WeatherClient {
    WeatherClient::new(url, timeout).unwrap()
}

pub fn client_for(url: &str) -> WeatherClient {
    client_with_timeout(url, Duration::from_secs(5))
}

pub fn pipeline_for(url: &str, ttl: Duration) -> Arc<Pipeline> {
    Arc::new(Pipeline::new(client_for(url), LOCATIONS.to_vec(), ttl))
}
