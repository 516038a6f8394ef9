//! Server-rendered HTML for the dashboard page.
//!
//! Pages are askama templates under `templates/`. Left column: listing,
//! scale note, refresh control, and any per-location errors. Right column:
//! the deck.gl column map, fed from an embedded JSON [`DeckSpec`].

use askama::Template;

use crate::{
    DeckSpec, FetchCycle, LocationFailure, LocationReading, RenderError, ELEVATION_PER_DEGREE,
};

// ---

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    title: &'a str,
    readings: &'a [LocationReading],
    failures: &'a [LocationFailure],
    fetched_at: String,
    scale: String,
    /// Rendered unescaped inside `<script type="application/json">`.
    deck_json: String,
}

/// Serialize for a JSON script block; `</` is escaped so the data cannot end the element.
fn embed_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Full dashboard page for one fetch cycle.
pub fn dashboard_page(cycle: &FetchCycle, deck: &DeckSpec) -> Result<String, RenderError> {
    // ---
    let page = DashboardTemplate {
        title: "City temperatures 3D map",
        readings: &cycle.readings,
        failures: &cycle.failures,
        fetched_at: cycle.fetched_at.format("%Y/%m/%d %H:%M:%S UTC").to_string(),
        scale: format_thousands(ELEVATION_PER_DEGREE as u64),
        deck_json: embed_json(deck)?,
    };

    Ok(page.render()?)
}

/// `5000` -> `5,000`.
fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
