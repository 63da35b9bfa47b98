use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuakeMapError {
    #[error("Feed request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Feed returned HTTP {status} for {url}")]
    FeedStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown base layer: {name}")]
    UnknownLayerError { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed run. Never zero.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Medium => 2,
            Self::High => 1,
            Self::Critical => 3,
        }
    }
}

impl QuakeMapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::FeedStatusError { .. } => ErrorCategory::Network,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::UnknownLayerError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(_) | Self::FeedStatusError { .. } => {
                format!("Could not download the earthquake feed: {}", self)
            }
            Self::SerializationError(_) => {
                "The earthquake feed could not be read as GeoJSON".to_string()
            }
            Self::CsvError(_) => "Failed to write the marker table".to_string(),
            Self::IoError(e) => format!("Failed to write output files: {}", e),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the network connection and the feed URL, or rerun without --strict"
            }
            ErrorCategory::Data => "Verify that the feed URL serves a GeoJSON FeatureCollection",
            ErrorCategory::Configuration => "Review the command-line flags or the config file",
            ErrorCategory::System => "Check that the output directory is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuakeMapError>;
