use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::errors::CoastError;
use crate::models::{HeatLayer, MarkerDescriptor, Position};

pub type LayerId = u64;

/// Initial map view handed to the mapping provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub center: Position,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

/// Output port to the mapping provider. Owned exclusively by the render
/// coordinator.
pub trait MapSurface: Send + Sync {
    fn set_view(&mut self, viewport: &Viewport);

    fn add_marker(&mut self, marker: &MarkerDescriptor) -> LayerId;

    /// Fails with [`CoastError::CapabilityUnavailable`] when the provider has
    /// no heat renderer.
    fn add_heat_layer(&mut self, layer: &HeatLayer) -> Result<LayerId, CoastError>;

    fn remove_layer(&mut self, id: LayerId);

    /// Recompute the surface size after layout settles.
    fn invalidate_size(&mut self);
}

#[derive(Debug, Default)]
struct CanvasState {
    viewport: Option<Viewport>,
    markers: BTreeMap<LayerId, MarkerDescriptor>,
    heat: Option<(LayerId, HeatLayer)>,
    next_id: LayerId,
    invalidations: u32,
}

/// Headless map surface that records its layers. Clones share state, so a
/// clone kept outside the coordinator can inspect what was rendered.
#[derive(Debug, Clone)]
pub struct LayerCanvas {
    state: Arc<Mutex<CanvasState>>,
    heat_supported: bool,
}

impl LayerCanvas {
    pub fn new() -> Self {
        Self { state: Arc::default(), heat_supported: true }
    }

    /// A canvas whose provider lacks the heat plugin.
    pub fn without_heat() -> Self {
        Self { state: Arc::default(), heat_supported: false }
    }

    fn lock(&self) -> MutexGuard<'_, CanvasState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn marker_count(&self) -> usize {
        self.lock().markers.len()
    }

    pub fn markers(&self) -> Vec<MarkerDescriptor> {
        self.lock().markers.values().cloned().collect()
    }

    pub fn heat_point_count(&self) -> Option<usize> {
        self.lock().heat.as_ref().map(|(_, layer)| layer.points.len())
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.lock().viewport.clone()
    }

    pub fn invalidation_count(&self) -> u32 {
        self.lock().invalidations
    }

    pub fn layer_count(&self) -> usize {
        let state = self.lock();
        state.markers.len() + usize::from(state.heat.is_some())
    }
}

impl Default for LayerCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for LayerCanvas {
    fn set_view(&mut self, viewport: &Viewport) {
        self.lock().viewport = Some(viewport.clone());
    }

    fn add_marker(&mut self, marker: &MarkerDescriptor) -> LayerId {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.markers.insert(id, marker.clone());
        id
    }

    fn add_heat_layer(&mut self, layer: &HeatLayer) -> Result<LayerId, CoastError> {
        if !self.heat_supported {
            return Err(CoastError::CapabilityUnavailable("heat layer plugin not loaded".into()));
        }
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.heat = Some((id, layer.clone()));
        Ok(id)
    }

    fn remove_layer(&mut self, id: LayerId) {
        let mut state = self.lock();
        if state.markers.remove(&id).is_none() {
            if state.heat.as_ref().is_some_and(|(heat_id, _)| *heat_id == id) {
                state.heat = None;
            }
        }
    }

    fn invalidate_size(&mut self) {
        self.lock().invalidations += 1;
    }
}
