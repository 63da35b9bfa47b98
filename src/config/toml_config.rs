use crate::config::{parse_formats, validate_base_layer, validate_formats, DEFAULT_TITLE};
use crate::core::{ConfigProvider, OutputFormat};
use crate::feed::{summary_feed_url, FeedMagnitude, FeedPeriod};
use crate::utils::error::{QuakeMapError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub error_handling: ErrorHandlingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Takes precedence over `magnitude`/`period`.
    pub url: Option<String>,
    #[serde(default)]
    pub magnitude: FeedMagnitude,
    #[serde(default)]
    pub period: FeedPeriod,
    pub timeout_seconds: Option<u64>,
    pub min_magnitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_title")]
    pub title: String,
    pub base_layer: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_layer: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            formats: default_formats(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFailurePolicy {
    #[default]
    Skip,
    Fail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    #[serde(default)]
    pub on_feed_failure: FeedFailurePolicy,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_output_path() -> String {
    "./output".to_string()
}

fn default_formats() -> Vec<String> {
    vec!["html".to_string()]
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuakeMapError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| QuakeMapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.url", &self.feed_url())?;
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        if let Some(min) = self.source.min_magnitude {
            validation::validate_range("source.min_magnitude", min, -2.0, 10.0)?;
        }
        validation::validate_non_empty_string("map.title", &self.map.title)?;
        validate_base_layer("map.base_layer", self.map.base_layer.as_deref())?;
        validation::validate_path("output.path", &self.output.path)?;
        validate_formats("output.formats", &self.output.formats)
    }
}

impl ConfigProvider for TomlConfig {
    fn feed_url(&self) -> String {
        self.source
            .url
            .clone()
            .unwrap_or_else(|| summary_feed_url(self.source.magnitude, self.source.period))
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        parse_formats(&self.output.formats)
    }

    fn min_magnitude(&self) -> Option<f64> {
        self.source.min_magnitude
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }

    fn fail_on_feed_error(&self) -> bool {
        self.error_handling.on_feed_failure == FeedFailurePolicy::Fail
    }

    fn base_layer(&self) -> Option<&str> {
        self.map.base_layer.as_deref()
    }

    fn page_title(&self) -> &str {
        &self.map.title
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
magnitude = "2.5"
period = "day"
timeout_seconds = 30
min_magnitude = 3.0

[map]
title = "Pacific Rim"
base_layer = "Grayscale"

[output]
path = "./maps"
formats = ["html", "csv"]

[error_handling]
on_feed_failure = "fail"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.feed_url().ends_with("/2.5_day.geojson"));
        assert_eq!(config.timeout_seconds(), Some(30));
        assert_eq!(config.min_magnitude(), Some(3.0));
        assert_eq!(config.page_title(), "Pacific Rim");
        assert_eq!(config.base_layer(), Some("Grayscale"));
        assert_eq!(config.output_path(), "./maps");
        assert_eq!(
            config.output_formats(),
            vec![OutputFormat::Html, OutputFormat::Csv]
        );
        assert!(config.fail_on_feed_error());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.feed_url().ends_with("/all_week.geojson"));
        assert_eq!(config.page_title(), DEFAULT_TITLE);
        assert_eq!(config.output_formats(), vec![OutputFormat::Html]);
        assert!(!config.fail_on_feed_error());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUAKE_MAP_TEST_FEED", "https://feeds.example.com/quakes.geojson");

        let toml_content = r#"
[source]
url = "${QUAKE_MAP_TEST_FEED}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.feed_url(), "https://feeds.example.com/quakes.geojson");

        std::env::remove_var("QUAKE_MAP_TEST_FEED");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[source]
url = "${QUAKE_MAP_DEFINITELY_UNSET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.feed_url(), "${QUAKE_MAP_DEFINITELY_UNSET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let bad_format = TomlConfig::from_toml_str("[output]\nformats = [\"pdf\"]").unwrap();
        assert!(bad_format.validate().is_err());

        let no_format = TomlConfig::from_toml_str("[output]\nformats = []").unwrap();
        assert!(matches!(
            no_format.validate(),
            Err(QuakeMapError::MissingConfigError { .. })
        ));

        let bad_magnitude = TomlConfig::from_toml_str("[source]\nmin_magnitude = 12.0").unwrap();
        assert!(bad_magnitude.validate().is_err());

        assert!(TomlConfig::from_toml_str("[source]\nperiod = \"year\"").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[map]
title = "From File"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.page_title(), "From File");
    }
}
