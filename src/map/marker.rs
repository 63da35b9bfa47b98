use crate::domain::model::Earthquake;
use crate::map::depth::{depth_color, marker_radius};
use serde::Serialize;

pub const STROKE_COLOR: &str = "#000";
pub const STROKE_WEIGHT: f64 = 0.5;
pub const STROKE_OPACITY: f64 = 1.0;
pub const FILL_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    /// `[latitude, longitude]`, the order Leaflet expects.
    pub position: [f64; 2],
    pub radius: f64,
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
    pub popup: String,
}

impl CircleMarker {
    pub fn for_earthquake(quake: &Earthquake) -> Self {
        Self {
            position: [quake.latitude, quake.longitude],
            radius: marker_radius(quake.magnitude),
            fill_color: depth_color(quake.depth),
            color: STROKE_COLOR,
            weight: STROKE_WEIGHT,
            opacity: STROKE_OPACITY,
            fill_opacity: FILL_OPACITY,
            popup: popup_html(quake),
        }
    }
}

pub fn popup_html(quake: &Earthquake) -> String {
    format!(
        "<strong>Magnitude:</strong> {}<br><strong>Location:</strong> {}<br><strong>Depth:</strong> {} km",
        escape_html(&quake.magnitude.to_string()),
        escape_html(&quake.place),
        escape_html(&quake.depth.to_string()),
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
