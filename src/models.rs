//! Data models for the temperature map.
//!
//! Upstream forecast payloads come in as [`ForecastResponse`] and are turned
//! into one [`LocationReading`] per location, carrying the display-only
//! attributes (color bucket, column elevation, formatted time).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{FetchError, Location};

// ---

/// Column height per degree Celsius, in metres.
pub const ELEVATION_PER_DEGREE: f64 = 5000.0;

/// Display format for observation times.
pub const OBSERVED_AT_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Raw forecast payload; only the `current` block is used.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    // ---
    pub current: CurrentConditions,
}

/// Current conditions as reported by the forecast API.
#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    // ---
    /// Local ISO-8601 timestamp, e.g. `2024-06-01T15:00`.
    pub time: String,
    pub temperature_2m: f64,
}

/// Coarse temperature class used to colour a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBucket {
    High,
    Mid,
    Low,
}

impl ColorBucket {
    // ---
    /// Lower bounds are inclusive: 20.0 is `High`, 10.0 is `Mid`.
    pub fn classify(temperature: f64) -> Self {
        if temperature >= 20.0 {
            ColorBucket::High
        } else if temperature >= 10.0 {
            ColorBucket::Mid
        } else {
            ColorBucket::Low
        }
    }

    /// Fill colour as `[r, g, b, a]`.
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            ColorBucket::High => [255, 100, 0, 200],
            ColorBucket::Mid => [255, 200, 0, 200],
            ColorBucket::Low => [0, 150, 255, 200],
        }
    }
}

/// One location's snapshot for a single fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationReading {
    // ---
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub observed_at: String,
    pub color_bucket: ColorBucket,
    pub elevation: f64,
}

impl LocationReading {
    pub fn color(&self) -> [u8; 4] {
        self.color_bucket.rgba()
    }
}

/// Column height for a temperature. Not clamped, so sub-zero readings go negative.
pub fn elevation_for(temperature: f64) -> f64 {
    temperature * ELEVATION_PER_DEGREE
}

/// Reformat an ISO-8601 timestamp as `YYYY/MM/DD HH:MM`.
///
/// The wall-clock time is kept as written; a trailing offset (`Z`, `z`,
/// `±HH`, `±HHMM`, `±HH:MM`) is dropped, not converted. The date and time
/// may be separated by `T`, `t` or a space. Returns `None` for anything
/// unparseable.
pub fn format_observed_at(raw: &str) -> Option<String> {
    // ---
    let naive = strip_utc_offset(raw.trim()).replacen(|c: char| c == 't' || c == ' ', "T", 1);

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&naive, fmt).ok())
        .map(|dt| dt.format(OBSERVED_AT_FORMAT).to_string())
}

/// Drop a well-formed trailing UTC offset; anything else is returned unchanged.
fn strip_utc_offset(s: &str) -> &str {
    // ---
    if let Some(rest) = s.strip_suffix(&['Z', 'z'][..]) {
        return rest;
    }

    // Only look for a sign after the time starts; the date has dashes too.
    let Some(time_start) = s.find(&['T', 't', ' '][..]) else {
        return s;
    };
    let Some(sign) = s[time_start..].rfind(&['+', '-'][..]).map(|i| time_start + i) else {
        return s;
    };

    let digits: Vec<char> = s[sign + 1..].chars().filter(|c| *c != ':').collect();
    let well_formed =
        matches!(digits.len(), 2 | 4) && digits.iter().all(|c| c.is_ascii_digit());

    if well_formed {
        &s[..sign]
    } else {
        s
    }
}

/// Transformation into a display reading
impl ForecastResponse {
    // ---
    pub fn to_reading(&self, location: &Location) -> Result<LocationReading, FetchError> {
        // ---
        let temperature = self.current.temperature_2m;
        let observed_at = format_observed_at(&self.current.time)
            .ok_or_else(|| FetchError::Timestamp(self.current.time.clone()))?;

        Ok(LocationReading {
            name: location.name.to_string(),
            latitude: location.latitude,
            longitude: location.longitude,
            temperature,
            observed_at,
            color_bucket: ColorBucket::classify(temperature),
            elevation: elevation_for(temperature),
        })
    }
}
