use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// Drives one fetch-render-write pass.
pub struct MapEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> MapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting earthquake map build");

        tracing::info!("Fetching feed...");
        let earthquakes = self.pipeline.extract().await?;

        tracing::info!("Drawing {} earthquakes...", earthquakes.len());
        let rendered = self.pipeline.transform(earthquakes).await?;
        tracing::info!(
            "Map ready: {} markers, base layer '{}'",
            rendered.context.markers().len(),
            rendered.context.active_layer().name
        );

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(rendered).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
