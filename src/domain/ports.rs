use crate::domain::model::{Earthquake, RenderResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Csv,
    Json,
}

impl OutputFormat {
    pub const ALL: [&'static str; 3] = ["html", "csv", "json"];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "html" => Some(Self::Html),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Html => "quake_map.html",
            Self::Csv => "earthquakes.csv",
            Self::Json => "map.json",
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn feed_url(&self) -> String;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Vec<OutputFormat>;
    fn min_magnitude(&self) -> Option<f64>;
    fn timeout_seconds(&self) -> Option<u64>;
    /// When false a failed feed request renders an empty map instead of
    /// failing the run.
    fn fail_on_feed_error(&self) -> bool;
    fn base_layer(&self) -> Option<&str>;
    fn page_title(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Earthquake>>;
    async fn transform(&self, data: Vec<Earthquake>) -> Result<RenderResult>;
    async fn load(&self, result: RenderResult) -> Result<String>;
}
