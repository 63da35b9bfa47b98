use crate::domain::model::Earthquake;
use crate::map::layers::{BaseLayer, STREET_LAYER};
use crate::map::legend::Legend;
use crate::map::marker::CircleMarker;
use crate::utils::error::{QuakeMapError, Result};
use serde::Serialize;

pub const DEFAULT_CENTER: [f64; 2] = [20.0, 0.0];
pub const DEFAULT_ZOOM: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: [f64; 2],
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Everything needed to draw one map: viewport, base layers, markers and the
/// legend overlay. Owned by a single render pass.
#[derive(Debug, Clone, Serialize)]
pub struct MapContext {
    pub container_id: String,
    pub viewport: Viewport,
    base_layers: Vec<BaseLayer>,
    active_layer: usize,
    markers: Vec<CircleMarker>,
    pub legend: Legend,
}

impl MapContext {
    /// Fixed viewport, the three default base layers with the street layer
    /// visible, and the depth legend.
    pub fn bootstrap(container_id: impl Into<String>) -> Self {
        let base_layers = BaseLayer::defaults();
        let active_layer = base_layers
            .iter()
            .position(|layer| layer.name == STREET_LAYER)
            .unwrap_or(0);

        Self {
            container_id: container_id.into(),
            viewport: Viewport::default(),
            base_layers,
            active_layer,
            markers: Vec::new(),
            legend: Legend::build(),
        }
    }

    pub fn base_layers(&self) -> &[BaseLayer] {
        &self.base_layers
    }

    pub fn active_layer(&self) -> &BaseLayer {
        &self.base_layers[self.active_layer]
    }

    /// Layers currently shown. Always exactly one.
    pub fn visible_base_layers(&self) -> impl Iterator<Item = &BaseLayer> {
        self.base_layers
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i == self.active_layer)
            .map(|(_, layer)| layer)
    }

    /// Shows `name` and hides whichever base layer was visible before.
    pub fn select_base_layer(&mut self, name: &str) -> Result<&BaseLayer> {
        let index = self
            .base_layers
            .iter()
            .position(|layer| layer.name == name)
            .ok_or_else(|| QuakeMapError::UnknownLayerError {
                name: name.to_string(),
            })?;

        if index != self.active_layer {
            tracing::debug!(
                "Switching base layer: {} -> {}",
                self.base_layers[self.active_layer].name,
                name
            );
            self.active_layer = index;
        }
        Ok(&self.base_layers[index])
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    pub fn add_marker(&mut self, marker: CircleMarker) {
        self.markers.push(marker);
    }

    /// Adds one marker per earthquake, in the given order.
    pub fn add_earthquakes<'a, I>(&mut self, quakes: I) -> usize
    where
        I: IntoIterator<Item = &'a Earthquake>,
    {
        let before = self.markers.len();
        for quake in quakes {
            self.add_marker(CircleMarker::for_earthquake(quake));
        }
        self.markers.len() - before
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    /// Reload path: drops the previous marker set before drawing the new one.
    pub fn replace_markers<'a, I>(&mut self, quakes: I) -> usize
    where
        I: IntoIterator<Item = &'a Earthquake>,
    {
        self.clear_markers();
        self.add_earthquakes(quakes)
    }
}
