//! The dashboard page and its refresh control.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use tracing::{error, info};

use crate::{templates, DeckSpec, Pipeline};

// ---

pub fn router() -> Router<Arc<Pipeline>> {
    // ---
    Router::new()
        .route("/", get(index))
        .route("/refresh", post(refresh))
}

async fn index(State(pipeline): State<Arc<Pipeline>>) -> impl IntoResponse {
    // ---
    info!("GET / - Rendering dashboard");

    let cycle = pipeline.current().await;
    let deck = DeckSpec::from_readings(&cycle.readings);

    match templates::dashboard_page(&cycle, &deck) {
        Ok(html) => (StatusCode::OK, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render dashboard: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render dashboard").into_response()
        }
    }
}

/// Refetch before redirecting, so the next render sees fresh data.
async fn refresh(State(pipeline): State<Arc<Pipeline>>) -> Redirect {
    // ---
    info!("POST /refresh - Forcing new fetch cycle");
    pipeline.refresh().await;
    Redirect::to("/")
}
