//! USGS GeoJSON summary format.
//!
//! Features are decoded one at a time so that a malformed record is skipped
//! with a warning instead of discarding the whole feed.

use crate::domain::model::Earthquake;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const UNKNOWN_PLACE: &str = "Unknown location";

#[derive(Debug, Deserialize)]
struct RawCollection {
    features: Vec<Value>,
}

// Fields below are informational: a value of an unexpected JSON type becomes
// `None` rather than rejecting the whole feature.

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_millis<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|millis| millis.is_finite())
            .map(|millis| millis.trunc() as i64)
    }))
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    pub mag: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub place: Option<String>,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

impl Feature {
    pub fn into_earthquake(self) -> std::result::Result<Earthquake, String> {
        let coords = self
            .geometry
            .ok_or_else(|| "missing geometry".to_string())?
            .coordinates;

        let [longitude, latitude, depth] = match coords.as_slice() {
            [Some(lon), Some(lat), Some(depth), ..] => [*lon, *lat, *depth],
            _ => {
                return Err(format!(
                    "expected [lon, lat, depth] coordinates, got {:?}",
                    coords
                ))
            }
        };
        if !(longitude.is_finite() && latitude.is_finite() && depth.is_finite()) {
            return Err("non-finite coordinates".to_string());
        }

        let magnitude = self
            .properties
            .mag
            .ok_or_else(|| "missing magnitude".to_string())?;

        Ok(Earthquake {
            id: self.id,
            longitude,
            latitude,
            depth,
            magnitude,
            place: self
                .properties
                .place
                .unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
            time: self.properties.time.and_then(DateTime::<Utc>::from_timestamp_millis),
            url: self.properties.url,
        })
    }
}

/// Parses a feed body. Fails only when the body is not a feature collection;
/// individual bad features are logged and dropped, feed order is kept.
pub fn parse_feed(body: &[u8]) -> Result<Vec<Earthquake>> {
    let raw: RawCollection = serde_json::from_slice(body)?;
    let total = raw.features.len();

    let earthquakes: Vec<Earthquake> = raw
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let decoded = serde_json::from_value::<Feature>(value)
                .map_err(|e| e.to_string())
                .and_then(Feature::into_earthquake);
            match decoded {
                Ok(quake) => Some(quake),
                Err(reason) => {
                    tracing::warn!("Skipping feature #{}: {}", index, reason);
                    None
                }
            }
        })
        .collect();

    tracing::debug!("Parsed {} of {} features", earthquakes.len(), total);
    Ok(earthquakes)
}
