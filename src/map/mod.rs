pub mod context;
pub mod depth;
pub mod html;
pub mod layers;
pub mod legend;
pub mod marker;

pub use context::{MapContext, Viewport};
pub use depth::{bucket_for, depth_color, marker_radius, DepthBucket, DEPTH_BUCKETS};
pub use layers::BaseLayer;
pub use legend::{Legend, LegendEntry};
pub use marker::CircleMarker;
