use serde::{Deserialize, Serialize};

pub const USGS_SUMMARY_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Magnitude threshold of a USGS summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FeedMagnitude {
    Significant,
    #[serde(rename = "4.5")]
    #[cfg_attr(feature = "cli", value(name = "4.5"))]
    M4_5,
    #[serde(rename = "2.5")]
    #[cfg_attr(feature = "cli", value(name = "2.5"))]
    M2_5,
    #[serde(rename = "1.0")]
    #[cfg_attr(feature = "cli", value(name = "1.0"))]
    M1_0,
    #[default]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FeedPeriod {
    Hour,
    Day,
    #[default]
    Week,
    Month,
}

impl FeedMagnitude {
    fn slug(self) -> &'static str {
        match self {
            Self::Significant => "significant",
            Self::M4_5 => "4.5",
            Self::M2_5 => "2.5",
            Self::M1_0 => "1.0",
            Self::All => "all",
        }
    }
}

impl FeedPeriod {
    fn slug(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Summary feed URL, e.g. `.../summary/all_week.geojson`.
pub fn summary_feed_url(magnitude: FeedMagnitude, period: FeedPeriod) -> String {
    format!(
        "{}/{}_{}.geojson",
        USGS_SUMMARY_BASE,
        magnitude.slug(),
        period.slug()
    )
}

pub fn default_feed_url() -> String {
    summary_feed_url(FeedMagnitude::default(), FeedPeriod::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feed_is_all_week() {
        assert_eq!(
            default_feed_url(),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
        );
    }

    #[test]
    fn test_summary_feed_urls() {
        assert!(summary_feed_url(FeedMagnitude::M4_5, FeedPeriod::Day).ends_with("/4.5_day.geojson"));
        assert!(summary_feed_url(FeedMagnitude::Significant, FeedPeriod::Month)
            .ends_with("/significant_month.geojson"));
    }

    #[test]
    fn test_deserialize_from_config_names() {
        let m: FeedMagnitude = serde_json::from_str("\"2.5\"").unwrap();
        let p: FeedPeriod = serde_json::from_str("\"hour\"").unwrap();
        assert_eq!(m, FeedMagnitude::M2_5);
        assert_eq!(p, FeedPeriod::Hour);
    }
}
