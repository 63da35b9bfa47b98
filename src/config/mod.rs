pub mod cli;
pub mod toml_config;

use crate::core::OutputFormat;
use crate::map::layers::{GRAYSCALE_LAYER, SATELLITE_LAYER, STREET_LAYER};
use crate::utils::error::{QuakeMapError, Result};

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::feed::{summary_feed_url, FeedMagnitude, FeedPeriod};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Recent Earthquakes";

/// Known format names in the given order; unknown names are dropped.
pub(crate) fn parse_formats(names: &[String]) -> Vec<OutputFormat> {
    names.iter().filter_map(|n| OutputFormat::parse(n)).collect()
}

pub(crate) fn validate_formats(field: &str, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(QuakeMapError::MissingConfigError {
            field: field.to_string(),
        });
    }
    for name in names {
        if OutputFormat::parse(name).is_none() {
            return Err(QuakeMapError::InvalidConfigValueError {
                field: field.to_string(),
                value: name.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::ALL.join(", ")
                ),
            });
        }
    }
    Ok(())
}

pub(crate) fn validate_base_layer(field: &str, name: Option<&str>) -> Result<()> {
    match name {
        None => Ok(()),
        Some(name) if [STREET_LAYER, SATELLITE_LAYER, GRAYSCALE_LAYER].contains(&name) => Ok(()),
        Some(name) => Err(QuakeMapError::UnknownLayerError {
            name: name.to_string(),
        }),
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, clap::Parser)]
#[command(name = "quake-map")]
#[command(about = "Render recent earthquakes from the USGS feed onto an interactive map")]
pub struct CliConfig {
    /// Feed URL; overrides --magnitude and --period
    #[arg(long)]
    pub feed_url: Option<String>,

    #[arg(long, value_enum, default_value_t = FeedMagnitude::All)]
    pub magnitude: FeedMagnitude,

    #[arg(long, value_enum, default_value_t = FeedPeriod::Week)]
    pub period: FeedPeriod,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "html")]
    pub formats: Vec<String>,

    /// Skip events below this magnitude
    #[arg(long, allow_negative_numbers = true)]
    pub min_magnitude: Option<f64>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Fail the run when the feed cannot be fetched instead of drawing an empty map
    #[arg(long)]
    pub strict: bool,

    /// Base layer visible when the page opens
    #[arg(long)]
    pub base_layer: Option<String>,

    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Load settings from a TOML file; the file takes precedence over every
    /// map and output flag
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Flags set away from their defaults. They have no effect when
    /// `--config` is given.
    pub fn overridden_flags(&self) -> Vec<&'static str> {
        let checks = [
            ("--feed-url", self.feed_url.is_some()),
            ("--magnitude", self.magnitude != FeedMagnitude::default()),
            ("--period", self.period != FeedPeriod::default()),
            ("--output-path", self.output_path != "./output"),
            ("--formats", self.formats != ["html"]),
            ("--min-magnitude", self.min_magnitude.is_some()),
            ("--timeout-seconds", self.timeout_seconds.is_some()),
            ("--strict", self.strict),
            ("--base-layer", self.base_layer.is_some()),
            ("--title", self.title != DEFAULT_TITLE),
        ];
        checks
            .into_iter()
            .filter(|(_, set)| *set)
            .map(|(flag, _)| flag)
            .collect()
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn feed_url(&self) -> String {
        self.feed_url
            .clone()
            .unwrap_or_else(|| summary_feed_url(self.magnitude, self.period))
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        parse_formats(&self.formats)
    }

    fn min_magnitude(&self) -> Option<f64> {
        self.min_magnitude
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn fail_on_feed_error(&self) -> bool {
        self.strict
    }

    fn base_layer(&self) -> Option<&str> {
        self.base_layer.as_deref()
    }

    fn page_title(&self) -> &str {
        &self.title
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("feed_url", &self.feed_url())?;
        validation::validate_path("output_path", &self.output_path)?;
        validate_formats("formats", &self.formats)?;
        if let Some(min) = self.min_magnitude {
            validation::validate_range("min_magnitude", min, -2.0, 10.0)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        validate_base_layer("base_layer", self.base_layer.as_deref())?;
        validation::validate_non_empty_string("title", &self.title)
    }
}
