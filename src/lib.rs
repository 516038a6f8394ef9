//! Current temperatures for major Japanese cities, drawn as a 3D column map.
//!
//! Modules follow the Explicit Module Boundary Pattern (EMBP): siblings import
//! each other only through the re-exports below, never by reaching into a
//! sibling's path.

mod cache;
mod chart;
mod config;
mod error;
mod fetcher;
mod locations;
mod models;
pub mod routes;
pub mod templates;

pub use cache::{Pipeline, ReadingCache};
pub use chart::{ColumnDatum, ColumnLayer, DeckSpec, Tooltip, ViewState, COLUMN_RADIUS};
pub use config::{load_from_env, Config};
pub use error::{FetchError, LocationFailure, RenderError};
pub use fetcher::{FetchCycle, WeatherClient, TIMEZONE};
pub use locations::{Location, LOCATIONS, VIEW_CENTER_LATITUDE, VIEW_CENTER_LONGITUDE};
pub use models::{
    elevation_for, format_observed_at, ColorBucket, CurrentConditions, ForecastResponse,
    LocationReading, ELEVATION_PER_DEGREE,
};
