//! The drawing surface: feature registry, sketch input, and map rendering.
//!
//! This is the adapter between raw pointer input and the rest of the
//! application. Everything downstream (the sync controller, the store)
//! only ever sees the [`DrawSurface`] command surface and the
//! [`FeatureCreated`] / [`FeatureUpdated`] / [`FeatureDeleted`] messages;
//! how rings are sketched and rendered is private to this module.

mod input;
mod rendering;
mod surface;

pub use surface::{DrawMode, DrawSurface, Feature, FeatureId, SurfaceState};

use bevy::prelude::*;

use crate::geometry::Ring;
use crate::sync::SyncSet;

/// A new ring was drawn and registered under a fresh feature id.
#[derive(Message)]
pub struct FeatureCreated {
    pub id: FeatureId,
    pub ring: Ring,
}

/// An existing feature's ring changed (vertex edit).
#[derive(Message)]
pub struct FeatureUpdated {
    pub id: FeatureId,
    pub ring: Ring,
}

/// A feature was removed from the surface.
#[derive(Message)]
pub struct FeatureDeleted {
    pub id: FeatureId,
}

/// In-progress polygon sketch (open vertex chain, lon/lat degrees).
#[derive(Resource, Default)]
pub struct SketchState {
    pub vertices: Vec<bevy::math::DVec2>,
}

/// Active vertex drag, if any.
#[derive(Resource, Default)]
pub struct VertexDragState {
    pub active: Option<VertexDrag>,
}

pub struct VertexDrag {
    pub feature: FeatureId,
    pub index: usize,
    pub moved: bool,
}

/// The feature last clicked on the map, used as the zoom-to-parcel anchor.
#[derive(Resource, Default)]
pub struct SelectedParcel(pub Option<FeatureId>);

/// Derived overlap regions between drawn features, shown as a map overlay.
#[derive(Resource, Default)]
pub struct IntersectionOverlay {
    pub regions: Vec<Ring>,
    pub visible: bool,
}

impl IntersectionOverlay {
    pub fn clear(&mut self) {
        self.regions.clear();
        self.visible = false;
    }
}

pub struct DrawPlugin;

impl Plugin for DrawPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawSurface>()
            .init_resource::<SketchState>()
            .init_resource::<VertexDragState>()
            .init_resource::<SelectedParcel>()
            .init_resource::<IntersectionOverlay>()
            .add_message::<FeatureCreated>()
            .add_message::<FeatureUpdated>()
            .add_message::<FeatureDeleted>()
            .add_systems(Startup, surface::initialize_surface)
            .add_systems(
                Update,
                (
                    input::handle_sketch_input,
                    input::handle_vertex_drag,
                    input::handle_parcel_click,
                )
                    .chain()
                    .in_set(SyncSet::DrawEvents),
            )
            .add_systems(
                Update,
                (
                    rendering::render_features,
                    rendering::render_sketch_preview,
                    rendering::render_intersections,
                ),
            );
    }
}
