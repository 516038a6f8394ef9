//! Weather API client and the per-cycle batch fetch.
//!
//! Locations are fetched one at a time, in table order. A failing location is
//! logged and recorded by name; it never stops the rest of the batch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{FetchError, ForecastResponse, Location, LocationFailure, LocationReading};

// ---

/// Timezone sent upstream so returned times are already local.
pub const TIMEZONE: &str = "Asia/Tokyo";

/// Result of one complete pass over the location table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchCycle {
    // ---
    pub fetched_at: DateTime<Utc>,
    /// Successful locations, in input order.
    pub readings: Vec<LocationReading>,
    pub failures: Vec<LocationFailure>,
}

/// Thin client over the forecast endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    // ---
    client: Client,
    base_url: String,
}

impl WeatherClient {
    // ---
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        // ---
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch current conditions for a single location.
    pub async fn fetch_location(&self, location: &Location) -> Result<LocationReading, FetchError> {
        // ---
        let params = [
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current", "temperature_2m".to_string()),
            ("timezone", TIMEZONE.to_string()),
        ];

        debug!("Fetching {} from {}", location.name, self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("{} raw response: {}", location.name, body);

        let forecast: ForecastResponse = serde_json::from_str(&body)?;
        forecast.to_reading(location)
    }

    /// Run one fetch cycle over `locations`. Never fails as a whole.
    pub async fn fetch_all(&self, locations: &[Location]) -> FetchCycle {
        // ---
        info!("Starting fetch cycle for {} locations", locations.len());

        let mut readings = Vec::with_capacity(locations.len());
        let mut failures = Vec::new();

        for location in locations {
            match self.fetch_location(location).await {
                Ok(reading) => readings.push(reading),
                Err(e) => {
                    warn!("Error fetching {}: {}", location.name, e);
                    failures.push(LocationFailure::new(location.name, &e));
                }
            }
        }

        info!(
            "Fetch cycle complete: {} ok, {} failed",
            readings.len(),
            failures.len()
        );

        FetchCycle {
            fetched_at: Utc::now(),
            readings,
            failures,
        }
    }
}
