//! Declarative description of the 3D column map.
//!
//! Nothing here knows how columns are drawn; [`DeckSpec`] is plain data that
//! the page script hands to deck.gl as-is. Field names serialize in the
//! camelCase the renderer expects.

use serde::Serialize;

use crate::{LocationReading, VIEW_CENTER_LATITUDE, VIEW_CENTER_LONGITUDE};

// ---

/// Column footprint radius, in metres.
pub const COLUMN_RADIUS: f64 = 15_000.0;

/// Token-free light basemap.
pub const MAP_STYLE: &str = "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json";

/// Hover text; `{field}` placeholders name [`ColumnDatum`] fields.
pub const TOOLTIP_TEMPLATE: &str =
    "<b>{name}</b><br>Temperature: {temperature}°C<br>Time: {observed_at}";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSpec {
    // ---
    pub initial_view_state: ViewState,
    pub map_style: &'static str,
    pub layers: Vec<ColumnLayer>,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    // ---
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            latitude: VIEW_CENTER_LATITUDE,
            longitude: VIEW_CENTER_LONGITUDE,
            zoom: 5.5,
            pitch: 50.0,
            bearing: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayer {
    // ---
    pub id: &'static str,
    pub radius: f64,
    pub pickable: bool,
    pub auto_highlight: bool,
    pub data: Vec<ColumnDatum>,
}

/// One column: where it stands, how tall, what colour, and what the tooltip shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDatum {
    // ---
    pub name: String,
    /// `[longitude, latitude]`
    pub position: [f64; 2],
    pub elevation: f64,
    pub fill_color: [u8; 4],
    pub temperature: f64,
    pub observed_at: String,
}

impl From<&LocationReading> for ColumnDatum {
    fn from(r: &LocationReading) -> Self {
        Self {
            name: r.name.clone(),
            position: [r.longitude, r.latitude],
            elevation: r.elevation,
            fill_color: r.color(),
            temperature: r.temperature,
            observed_at: r.observed_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    // ---
    pub html: &'static str,
    pub style: TooltipStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipStyle {
    // ---
    pub color: &'static str,
    pub background_color: &'static str,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            html: TOOLTIP_TEMPLATE,
            style: TooltipStyle {
                color: "white",
                background_color: "black",
            },
        }
    }
}

impl DeckSpec {
    // ---
    pub fn from_readings(readings: &[LocationReading]) -> Self {
        // ---
        let layer = ColumnLayer {
            id: "temperature-columns",
            radius: COLUMN_RADIUS,
            pickable: true,
            auto_highlight: true,
            data: readings.iter().map(ColumnDatum::from).collect(),
        };

        Self {
            initial_view_state: ViewState::default(),
            map_style: MAP_STYLE,
            layers: vec![layer],
            tooltip: Tooltip::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::ColorBucket;

    fn create_test_reading(name: &str, temperature: f64) -> LocationReading {
        // ---
        let bucket = ColorBucket::classify(temperature);
        LocationReading {
            name: name.to_string(),
            latitude: 33.5904,
            longitude: 130.4017,
            temperature,
            observed_at: "2024/06/01 15:00".to_string(),
            color_bucket: bucket,
            elevation: temperature * 5000.0,
        }
    }

    #[test]
    fn test_column_per_reading() {
        // ---
        let readings = vec![
            create_test_reading("Fukuoka", 24.0),
            create_test_reading("Saga", 12.0),
        ];
        let spec = DeckSpec::from_readings(&readings);

        assert_eq!(spec.layers.len(), 1);
        let data = &spec.layers[0].data;
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].name, "Fukuoka");
        assert_eq!(data[0].position, [130.4017, 33.5904]);
        assert_eq!(data[0].elevation, 120_000.0);
        assert_eq!(data[0].fill_color, [255, 100, 0, 200]);
        assert_eq!(data[1].fill_color, [255, 200, 0, 200]);
    }

    #[test]
    fn test_empty_readings_give_empty_layer() {
        // ---
        let spec = DeckSpec::from_readings(&[]);
        assert!(spec.layers[0].data.is_empty());
        assert_eq!(spec.initial_view_state, ViewState::default());
    }

    #[test]
    fn test_view_state_defaults() {
        // ---
        let view = ViewState::default();
        assert_eq!(view.latitude, 33.5);
        assert_eq!(view.longitude, 134.5);
        assert_eq!(view.zoom, 5.5);
        assert_eq!(view.pitch, 50.0);
        assert_eq!(view.bearing, 0.0);
    }

    #[test]
    fn test_serialized_field_names() {
        // ---
        let spec = DeckSpec::from_readings(&[create_test_reading("Oita", 8.0)]);
        let json = serde_json::to_value(&spec).unwrap();

        assert!(json.get("initialViewState").is_some());
        assert_eq!(json["layers"][0]["autoHighlight"], true);
        assert_eq!(json["layers"][0]["radius"], 15000.0);
        assert_eq!(json["tooltip"]["style"]["backgroundColor"], "black");
        assert_eq!(
            json["layers"][0]["data"][0]["fill_color"],
            serde_json::json!([0, 150, 255, 200])
        );
    }

    #[test]
    fn test_tooltip_placeholders_match_datum_fields() {
        // ---
        let datum = ColumnDatum::from(&create_test_reading("Miyazaki", 18.0));
        let json = serde_json::to_value(&datum).unwrap();

        for field in ["name", "temperature", "observed_at"] {
            assert!(TOOLTIP_TEMPLATE.contains(&format!("{{{field}}}")));
            assert!(json.get(field).is_some(), "datum is missing {field}");
        }
    }
}
