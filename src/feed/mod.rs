pub mod client;
pub mod geojson;
pub mod kind;

pub use client::FeedClient;
pub use geojson::parse_feed;
pub use kind::{default_feed_url, summary_feed_url, FeedMagnitude, FeedPeriod};
