use std::sync::Arc;

use axum::Router;

use crate::Pipeline;

mod dashboard;
mod health;
mod readings;

// ---

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    // ---
    Router::new()
        .merge(dashboard::router())
        .merge(readings::router())
        .merge(health::router())
        .with_state(pipeline)
}
