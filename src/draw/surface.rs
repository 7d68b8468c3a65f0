//! The stateful drawing surface behind the adapter interface.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::geometry::Ring;

/// Identifier assigned by the surface when a feature is created. Stable for
/// the feature's lifetime and unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureId(pub(crate) u64);

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Readiness of the surface. Commands issued while `Loading` are warn-level
/// no-ops; there is deliberately no timeout on reaching `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    #[default]
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Select,
    DrawPolygon,
}

#[derive(Debug, Clone)]
pub struct Feature {
    pub id: FeatureId,
    pub ring: Ring,
}

/// Feature registry plus mode and readiness. Features are kept in insertion
/// order, so "the most recently drawn feature" is simply the last element.
#[derive(Resource, Default)]
pub struct DrawSurface {
    state: SurfaceState,
    mode: DrawMode,
    features: Vec<Feature>,
    next_id: u64,
}

impl DrawSurface {
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SurfaceState::Ready
    }

    pub fn mark_ready(&mut self) {
        self.state = SurfaceState::Ready;
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn enter_draw_mode(&mut self) {
        if !self.is_ready() {
            warn!("drawing surface not ready, ignoring enter_draw_mode");
            return;
        }
        self.mode = DrawMode::DrawPolygon;
    }

    pub fn exit_draw_mode(&mut self) {
        self.mode = DrawMode::Select;
    }

    /// Register a drawn ring and assign it a fresh id.
    pub fn create_feature(&mut self, ring: Ring) -> Option<FeatureId> {
        if !self.is_ready() {
            warn!("drawing surface not ready, ignoring create_feature");
            return None;
        }
        self.next_id += 1;
        let id = FeatureId(self.next_id);
        self.features.push(Feature { id, ring });
        Some(id)
    }

    pub fn update_feature(&mut self, id: FeatureId, ring: Ring) -> bool {
        match self.features.iter_mut().find(|f| f.id == id) {
            Some(feature) => {
                feature.ring = ring;
                true
            }
            None => false,
        }
    }

    /// Move one vertex of a feature, keeping the ring closed: moving either
    /// endpoint moves both.
    pub fn move_vertex(&mut self, id: FeatureId, index: usize, point: DVec2) -> bool {
        let Some(feature) = self.features.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        let len = feature.ring.points.len();
        if index >= len {
            return false;
        }
        feature.ring.points[index] = point;
        if index == 0 && len > 1 {
            feature.ring.points[len - 1] = point;
        } else if index == len - 1 && len > 1 {
            feature.ring.points[0] = point;
        }
        true
    }

    pub fn delete_feature(&mut self, id: FeatureId) -> bool {
        if !self.is_ready() {
            warn!("drawing surface not ready, ignoring delete_feature");
            return false;
        }
        let before = self.features.len();
        self.features.retain(|f| f.id != id);
        before != self.features.len()
    }

    pub fn get_all(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn rings(&self) -> Vec<Ring> {
        self.features.iter().map(|f| f.ring.clone()).collect()
    }
}

/// Startup system: the surface becomes ready once the map view exists. In a
/// deployment where styles or tiles load remotely this is the point that
/// would flip asynchronously.
pub fn initialize_surface(mut surface: ResMut<DrawSurface>) {
    surface.mark_ready();
    info!("drawing surface ready");
}
