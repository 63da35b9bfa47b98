use crate::core::{ConfigProvider, Earthquake, OutputFormat, Pipeline, RenderResult, Storage};
use crate::feed::FeedClient;
use crate::map::html::render_page;
use crate::map::{depth_color, marker_radius, MapContext};
use crate::utils::error::{QuakeMapError, Result};
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;

pub const MAP_CONTAINER_ID: &str = "map";

pub struct QuakePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    feed: FeedClient,
}

impl<S: Storage, C: ConfigProvider> QuakePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let feed = FeedClient::new(config.timeout_seconds().map(Duration::from_secs))?;
        Ok(Self {
            storage,
            config,
            feed,
        })
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    time: String,
    latitude: f64,
    longitude: f64,
    depth_km: f64,
    magnitude: f64,
    place: &'a str,
    color: &'static str,
    radius: f64,
}

fn marker_table(earthquakes: &[Earthquake]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for quake in earthquakes {
        writer.serialize(CsvRow {
            id: quake.id.as_deref().unwrap_or(""),
            time: quake.time.map(|t| t.to_rfc3339()).unwrap_or_default(),
            latitude: quake.latitude,
            longitude: quake.longitude,
            depth_km: quake.depth,
            magnitude: quake.magnitude,
            place: &quake.place,
            color: depth_color(quake.depth),
            radius: marker_radius(quake.magnitude),
        })?;
    }
    writer
        .into_inner()
        .map_err(|e| QuakeMapError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for QuakePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Earthquake>> {
        match self.feed.fetch(&self.config.feed_url()).await {
            Ok(earthquakes) => {
                tracing::info!("Fetched {} earthquakes", earthquakes.len());
                Ok(earthquakes)
            }
            Err(e) if !self.config.fail_on_feed_error() => {
                tracing::warn!("Feed unavailable, rendering map without markers: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn transform(&self, data: Vec<Earthquake>) -> Result<RenderResult> {
        let mut context = MapContext::bootstrap(MAP_CONTAINER_ID);
        if let Some(layer) = self.config.base_layer() {
            context.select_base_layer(layer)?;
        }

        let earthquakes: Vec<Earthquake> = match self.config.min_magnitude() {
            Some(min) => {
                let before = data.len();
                let kept: Vec<Earthquake> =
                    data.into_iter().filter(|q| q.magnitude >= min).collect();
                tracing::debug!(
                    "Magnitude filter >= {} kept {} of {} events",
                    min,
                    kept.len(),
                    before
                );
                kept
            }
            None => data,
        };

        let drawn = context.replace_markers(&earthquakes);
        tracing::debug!("Drew {} markers", drawn);

        Ok(RenderResult {
            context,
            earthquakes,
            generated_at: Utc::now(),
        })
    }

    async fn load(&self, result: RenderResult) -> Result<String> {
        let formats = self.config.output_formats();
        if formats.is_empty() {
            return Err(QuakeMapError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }

        // Every payload is rendered before the first write.
        let mut outputs = Vec::with_capacity(formats.len());
        for format in formats {
            let data = match format {
                OutputFormat::Html => {
                    render_page(&result.context, self.config.page_title(), result.generated_at)?
                        .into_bytes()
                }
                OutputFormat::Csv => marker_table(&result.earthquakes)?,
                OutputFormat::Json => serde_json::to_vec_pretty(&result.context)?,
            };
            outputs.push((format.file_name(), data));
        }

        let primary = outputs[0].0;
        let mut written = Vec::with_capacity(outputs.len());
        for (file_name, data) in &outputs {
            tracing::debug!("Writing {} ({} bytes)", file_name, data.len());
            if let Err(e) = self.storage.write_file(file_name, data).await {
                if !written.is_empty() {
                    tracing::warn!(
                        "Output set is incomplete, already written: {}",
                        written.join(", ")
                    );
                }
                return Err(e);
            }
            written.push(*file_name);
        }

        Ok(format!("{}/{}", self.config.output_path(), primary))
    }
}
