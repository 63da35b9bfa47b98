//! Depth buckets shared by marker coloring and the legend.

use serde::Serialize;

/// One depth range: everything at or above `lower_bound` km up to the next
/// bucket's bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthBucket {
    pub lower_bound: f64,
    pub color: &'static str,
}

impl DepthBucket {
    pub const fn new(lower_bound: f64, color: &'static str) -> Self {
        Self { lower_bound, color }
    }
}

/// Ascending by `lower_bound`. The first bucket also covers depths below its
/// bound (events above sea level report negative depth); the last one is
/// unbounded above.
pub const DEPTH_BUCKETS: [DepthBucket; 6] = [
    DepthBucket::new(0.0, "green"),
    DepthBucket::new(10.0, "yellow"),
    DepthBucket::new(30.0, "gold"),
    DepthBucket::new(50.0, "orange"),
    DepthBucket::new(70.0, "orangered"),
    DepthBucket::new(90.0, "red"),
];

/// Returns the bucket a depth in kilometers falls into. Boundary values belong
/// to the upper bucket; `NaN` lands in the bottom bucket.
pub fn bucket_for(depth: f64) -> &'static DepthBucket {
    DEPTH_BUCKETS
        .iter()
        .rev()
        .find(|bucket| depth >= bucket.lower_bound)
        .unwrap_or(&DEPTH_BUCKETS[0])
}

pub fn depth_color(depth: f64) -> &'static str {
    bucket_for(depth).color
}

pub fn marker_radius(magnitude: f64) -> f64 {
    magnitude * 2.0
}
