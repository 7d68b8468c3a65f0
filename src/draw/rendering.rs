//! Gizmo rendering for drawn features, the sketch preview, and the
//! intersection overlay.

use bevy::prelude::*;

use crate::constants::VERTEX_HANDLE_RADIUS_PX;
use crate::viewport::{lnglat_to_world, CameraParams};

use super::surface::{DrawMode, DrawSurface};
use super::{IntersectionOverlay, SelectedParcel, SketchState};

const FEATURE_COLOR: Color = Color::srgb(0.25, 0.46, 0.11);
const SELECTED_COLOR: Color = Color::srgb(0.95, 0.77, 0.06);
const SKETCH_COLOR: Color = Color::srgb(0.1, 0.4, 0.9);
const OVERLAY_COLOR: Color = Color::srgb(0.6, 0.13, 0.13);

pub fn render_features(
    mut gizmos: Gizmos,
    surface: Res<DrawSurface>,
    selected: Res<SelectedParcel>,
    camera: CameraParams,
) {
    let handle_radius = camera.px_to_world(VERTEX_HANDLE_RADIUS_PX);

    for feature in surface.get_all() {
        if feature.ring.len() < 2 {
            continue;
        }

        let color = if selected.0 == Some(feature.id) {
            SELECTED_COLOR
        } else {
            FEATURE_COLOR
        };

        let points: Vec<Vec2> = feature.ring.points.iter().map(|&p| lnglat_to_world(p)).collect();
        gizmos.linestrip_2d(points.iter().copied(), color);

        for &point in &points {
            gizmos.circle_2d(point, handle_radius, color);
        }
    }
}

pub fn render_sketch_preview(
    mut gizmos: Gizmos,
    surface: Res<DrawSurface>,
    sketch: Res<SketchState>,
    camera: CameraParams,
) {
    if surface.mode() != DrawMode::DrawPolygon || sketch.vertices.is_empty() {
        return;
    }

    let points: Vec<Vec2> = sketch.vertices.iter().map(|&p| lnglat_to_world(p)).collect();

    if points.len() >= 2 {
        gizmos.linestrip_2d(points.iter().copied(), SKETCH_COLOR);
    }

    // Rubber band from the last vertex to the cursor
    if let Some(cursor) = camera.cursor_world_pos()
        && let Some(&last) = points.last()
    {
        gizmos.line_2d(last, cursor, SKETCH_COLOR.with_alpha(0.5));
    }

    let handle_radius = camera.px_to_world(VERTEX_HANDLE_RADIUS_PX);
    for &point in &points {
        gizmos.circle_2d(point, handle_radius, SKETCH_COLOR);
    }

    // Emphasize the first vertex once clicking it would close the ring
    if points.len() >= 3 {
        gizmos.circle_2d(points[0], handle_radius * 2.0, SKETCH_COLOR);
    }
}

pub fn render_intersections(mut gizmos: Gizmos, overlay: Res<IntersectionOverlay>) {
    if !overlay.visible {
        return;
    }

    for region in &overlay.regions {
        if region.len() < 2 {
            continue;
        }
        let points: Vec<Vec2> = region.points.iter().map(|&p| lnglat_to_world(p)).collect();
        gizmos.linestrip_2d(points, OVERLAY_COLOR);
    }
}
