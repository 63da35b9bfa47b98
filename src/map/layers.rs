use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subdomains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
}

pub const STREET_LAYER: &str = "Street View";
pub const SATELLITE_LAYER: &str = "Satellite View";
pub const GRAYSCALE_LAYER: &str = "Grayscale";

impl BaseLayer {
    pub fn street() -> Self {
        Self {
            name: STREET_LAYER.to_string(),
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            subdomains: Vec::new(),
            max_zoom: None,
        }
    }

    pub fn satellite() -> Self {
        Self {
            name: SATELLITE_LAYER.to_string(),
            url_template: "https://{s}.google.com/vt/lyrs=s&x={x}&y={y}&z={z}".to_string(),
            attribution: "&copy; Google Maps".to_string(),
            subdomains: ["mt0", "mt1", "mt2", "mt3"].map(String::from).to_vec(),
            max_zoom: None,
        }
    }

    pub fn grayscale() -> Self {
        Self {
            name: GRAYSCALE_LAYER.to_string(),
            url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png"
                .to_string(),
            attribution: "&copy; <a href=\"https://carto.com/\">CartoDB</a>".to_string(),
            subdomains: "abcd".chars().map(String::from).collect(),
            max_zoom: Some(19),
        }
    }

    /// The three interchangeable base layers, street first.
    pub fn defaults() -> Vec<Self> {
        vec![Self::street(), Self::satellite(), Self::grayscale()]
    }
}
