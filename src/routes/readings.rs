use std::sync::Arc;

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{DeckSpec, FetchCycle, Pipeline};

// ---

pub fn router() -> Router<Arc<Pipeline>> {
    // ---
    Router::new()
        .route("/api/readings", get(readings))
        .route("/api/chart", get(chart))
}

/// Query parameters for `/api/readings`
#[derive(Debug, Default, Deserialize)]
pub struct ReadingsQuery {
    /// Bypass the memoized cycle.
    #[serde(default)]
    refresh: bool,
}

async fn readings(
    Query(params): Query<ReadingsQuery>,
    State(pipeline): State<Arc<Pipeline>>,
) -> Json<FetchCycle> {
    // ---
    debug!("GET /api/readings - {:?}", params);

    let cycle = if params.refresh {
        pipeline.refresh().await
    } else {
        pipeline.current().await
    };

    info!(
        "Returning {} readings, {} failures",
        cycle.readings.len(),
        cycle.failures.len()
    );
    Json(FetchCycle::clone(&cycle))
}

async fn chart(State(pipeline): State<Arc<Pipeline>>) -> Json<DeckSpec> {
    // ---
    let cycle = pipeline.current().await;
    Json(DeckSpec::from_readings(&cycle.readings))
}
