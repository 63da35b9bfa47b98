use crate::map::context::MapContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One validated feed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earthquake {
    pub id: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    /// Kilometers below the surface, negative above sea level.
    pub depth: f64,
    pub magnitude: f64,
    pub place: String,
    pub time: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RenderResult {
    pub context: MapContext,
    pub earthquakes: Vec<Earthquake>,
    pub generated_at: DateTime<Utc>,
}
