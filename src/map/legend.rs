use crate::map::depth::{DepthBucket, DEPTH_BUCKETS};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub position: &'static str,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Builds the depth legend from the bucket table, shallowest first.
    pub fn build() -> Self {
        Self::from_buckets(&DEPTH_BUCKETS)
    }

    pub fn from_buckets(buckets: &[DepthBucket]) -> Self {
        let entries = buckets
            .iter()
            .enumerate()
            .map(|(i, bucket)| {
                let label = match buckets.get(i + 1) {
                    Some(next) => format!("{}\u{2013}{} km", bucket.lower_bound, next.lower_bound),
                    None => format!("{}+ km", bucket.lower_bound),
                };
                LegendEntry {
                    color: bucket.color,
                    label,
                }
            })
            .collect();

        Self {
            title: "Depth".to_string(),
            position: "bottomright",
            entries,
        }
    }

    /// Inner HTML of the overlay panel.
    pub fn to_html(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                format!(
                    "<i style=\"background:{}; width: 12px; height: 12px; display:inline-block; margin-right:6px;\"></i> {}",
                    entry.color, entry.label
                )
            })
            .collect();

        format!("<strong>{}</strong><br>{}", self.title, lines.join("<br>"))
    }
}
