//! Pointer input: polygon sketching, vertex editing, and parcel selection.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::{SKETCH_CLOSE_RADIUS_PX, VERTEX_HIT_RADIUS_PX};
use crate::geometry::{ring_contains, Ring};
use crate::viewport::{is_cursor_over_ui, lnglat_to_world, CameraParams};

use super::surface::{DrawMode, DrawSurface, FeatureId};
use super::{FeatureCreated, FeatureUpdated, SelectedParcel, SketchState, VertexDrag, VertexDragState};

/// Build a polygon vertex by vertex while the surface is in draw mode.
///
/// Left click places a vertex; clicking the first vertex again (or pressing
/// Enter) closes the ring once three distinct vertices exist; Escape
/// abandons the sketch. Closing registers the feature and emits
/// `FeatureCreated`.
pub fn handle_sketch_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut surface: ResMut<DrawSurface>,
    mut sketch: ResMut<SketchState>,
    camera: CameraParams,
    mut contexts: EguiContexts,
    mut created: MessageWriter<FeatureCreated>,
) {
    if surface.mode() != DrawMode::DrawPolygon {
        if !sketch.vertices.is_empty() {
            sketch.vertices.clear();
        }
        return;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        sketch.vertices.clear();
        surface.exit_draw_mode();
        return;
    }

    if keyboard.just_pressed(KeyCode::Enter) && sketch.vertices.len() >= 3 {
        finish_sketch(&mut surface, &mut sketch, &mut created);
        return;
    }

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Some(world_pos) = camera.cursor_world_pos() else {
        return;
    };
    let Some(lnglat) = camera.cursor_lnglat() else {
        return;
    };

    // Clicking the first vertex closes the ring
    if sketch.vertices.len() >= 3 {
        let first_world = lnglat_to_world(sketch.vertices[0]);
        if world_pos.distance(first_world) <= camera.px_to_world(SKETCH_CLOSE_RADIUS_PX) {
            finish_sketch(&mut surface, &mut sketch, &mut created);
            return;
        }
    }

    sketch.vertices.push(lnglat);
}

fn finish_sketch(
    surface: &mut DrawSurface,
    sketch: &mut SketchState,
    created: &mut MessageWriter<FeatureCreated>,
) {
    let ring = Ring::close_from_open(std::mem::take(&mut sketch.vertices));
    if let Some(id) = surface.create_feature(ring.clone()) {
        info!("sketch closed as feature {} with {} points", id, ring.len());
        created.write(FeatureCreated { id, ring });
    }
    surface.exit_draw_mode();
}

/// Drag a vertex of an existing feature outside draw mode. Releasing the
/// button emits one `FeatureUpdated` carrying the final ring.
pub fn handle_vertex_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut surface: ResMut<DrawSurface>,
    mut drag: ResMut<VertexDragState>,
    camera: CameraParams,
    mut contexts: EguiContexts,
    mut updated: MessageWriter<FeatureUpdated>,
) {
    if surface.mode() != DrawMode::Select {
        drag.active = None;
        return;
    }

    if mouse_button.just_released(MouseButton::Left) {
        if let Some(active) = drag.active.take()
            && active.moved
            && let Some(feature) = surface.feature(active.feature)
        {
            updated.write(FeatureUpdated {
                id: feature.id,
                ring: feature.ring.clone(),
            });
        }
        return;
    }

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(world_pos) = camera.cursor_world_pos() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        drag.active = hit_vertex(&surface, world_pos, camera.px_to_world(VERTEX_HIT_RADIUS_PX));
        return;
    }

    if mouse_button.pressed(MouseButton::Left)
        && let Some(active) = drag.active.as_mut()
        && let Some(lnglat) = camera.cursor_lnglat()
        && surface.move_vertex(active.feature, active.index, lnglat)
    {
        active.moved = true;
    }
}

fn hit_vertex(surface: &DrawSurface, world_pos: Vec2, radius: f32) -> Option<VertexDrag> {
    for feature in surface.get_all() {
        // Skip the duplicated closing point; index 0 moves both ends
        let open_len = feature.ring.points.len().saturating_sub(1);
        for (index, &point) in feature.ring.points[..open_len].iter().enumerate() {
            if world_pos.distance(lnglat_to_world(point)) <= radius {
                return Some(VertexDrag {
                    feature: feature.id,
                    index,
                    moved: false,
                });
            }
        }
    }
    None
}

/// A plain click inside a feature marks it as the selected parcel, the
/// anchor for zoom-to-parcel. Runs after the drag handler so a vertex grab
/// does not double as a selection click.
pub fn handle_parcel_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    surface: Res<DrawSurface>,
    drag: Res<VertexDragState>,
    mut selected: ResMut<SelectedParcel>,
    camera: CameraParams,
    mut contexts: EguiContexts,
) {
    if surface.mode() != DrawMode::Select
        || drag.active.is_some()
        || !mouse_button.just_pressed(MouseButton::Left)
        || is_cursor_over_ui(&mut contexts)
    {
        return;
    }

    let Some(lnglat) = camera.cursor_lnglat() else {
        return;
    };

    let hit = surface
        .get_all()
        .iter()
        .find(|f| ring_contains(&f.ring, lnglat))
        .map(|f| f.id);

    if let Some(id) = hit {
        debug!("selected feature {}", id);
        selected.0 = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec2;

    fn surface_with_triangle() -> (DrawSurface, FeatureId) {
        let mut surface = DrawSurface::default();
        surface.mark_ready();
        let id = surface
            .create_feature(Ring::close_from_open(vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(0.0, 1.0),
                DVec2::new(1.0, 0.0),
            ]))
            .unwrap();
        (surface, id)
    }

    #[test]
    fn test_hit_vertex_finds_nearest_in_radius() {
        let (surface, id) = surface_with_triangle();
        let hit = hit_vertex(&surface, lnglat_to_world(DVec2::new(0.0, 1.0)), 1.0).unwrap();
        assert_eq!(hit.feature, id);
        assert_eq!(hit.index, 1);
        assert!(!hit.moved);
    }

    #[test]
    fn test_hit_vertex_misses_outside_radius() {
        let (surface, _) = surface_with_triangle();
        assert!(hit_vertex(&surface, lnglat_to_world(DVec2::new(5.0, 5.0)), 1.0).is_none());
    }

    #[test]
    fn test_hit_vertex_never_targets_closing_point() {
        let (surface, _) = surface_with_triangle();
        // The closing point coincides with vertex 0; a hit there must
        // resolve to index 0 so both ends move together.
        let hit = hit_vertex(&surface, lnglat_to_world(DVec2::new(0.0, 0.0)), 1.0).unwrap();
        assert_eq!(hit.index, 0);
    }
}
