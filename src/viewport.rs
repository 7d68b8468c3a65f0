//! Map camera: projection, pan/zoom, and fit-bounds handling.
//!
//! The map uses a plate carree projection: world units are degrees times
//! [`WORLD_UNITS_PER_DEGREE`]. Geometry stays in lon/lat; only the camera
//! and gizmos see world units.

use bevy::ecs::system::SystemParam;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowCloseRequested};
use bevy_egui::EguiContexts;

use crate::config::{AppConfig, ConfigLoaded, SaveConfigRequest};
use crate::constants::{MAX_ZOOM_SCALE, MIN_ZOOM_SCALE, WORLD_UNITS_PER_DEGREE};
use crate::geometry::Bounds;
use crate::sync::SyncSet;

pub fn lnglat_to_world(p: DVec2) -> Vec2 {
    (p * WORLD_UNITS_PER_DEGREE).as_vec2()
}

pub fn world_to_lnglat(p: Vec2) -> DVec2 {
    p.as_dvec2() / WORLD_UNITS_PER_DEGREE
}

#[derive(Component)]
pub struct MapCamera;

#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

/// Fit the viewport to a lon/lat bounding box with pixel padding.
#[derive(Message)]
pub struct FitBoundsRequest {
    pub bounds: Bounds,
    pub padding_px: f32,
}

/// Bundled camera and window queries for cursor-to-world calculations
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<MapCamera>>,
    pub zoom: Query<'w, 's, &'static CameraZoom, With<MapCamera>>,
}

impl CameraParams<'_, '_> {
    /// Get the world position of the cursor, if available
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let (camera, transform) = self.camera.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        camera.viewport_to_world_2d(transform, cursor_pos).ok()
    }

    pub fn cursor_lnglat(&self) -> Option<DVec2> {
        self.cursor_world_pos().map(world_to_lnglat)
    }

    /// Convert a screen-pixel distance to world units at the current zoom
    pub fn px_to_world(&self, px: f32) -> f32 {
        let scale = self.zoom.single().map(|z| z.scale).unwrap_or(1.0);
        px * scale
    }
}

/// Check if the cursor is over egui UI (for input gating)
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

pub fn spawn_camera(mut commands: Commands, config: Res<AppConfig>) {
    let center = lnglat_to_world(DVec2::from_array(config.data.start_center));
    commands.spawn((
        Camera2d,
        MapCamera,
        CameraZoom {
            scale: config.data.start_scale,
        },
        Transform::from_translation(center.extend(1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<MapCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<MapCamera>>,
) {
    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        // Multiplicative zoom: parcels live orders of magnitude below the
        // whole-map scale, so linear steps would be unusable.
        zoom.scale = (zoom.scale * (1.0 - scroll_amount)).clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<MapCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}

/// Solve camera center and zoom so the requested box fits the window with
/// the given padding on every side.
pub fn apply_fit_bounds(
    mut events: MessageReader<FitBoundsRequest>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut camera_query: Query<(&mut Transform, &mut CameraZoom), With<MapCamera>>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((mut transform, mut zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in events.read() {
        let usable_w = (window.width() - 2.0 * event.padding_px).max(1.0);
        let usable_h = (window.height() - 2.0 * event.padding_px).max(1.0);

        let box_w = (event.bounds.width() * WORLD_UNITS_PER_DEGREE) as f32;
        let box_h = (event.bounds.height() * WORLD_UNITS_PER_DEGREE) as f32;

        let scale = (box_w / usable_w)
            .max(box_h / usable_h)
            .clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE);

        let center = lnglat_to_world(event.bounds.center());
        transform.translation.x = center.x;
        transform.translation.y = center.y;
        zoom.scale = scale;

        debug!(
            "fit viewport to [{:.4}, {:.4}]..[{:.4}, {:.4}], scale {:.4}",
            event.bounds.min_lon, event.bounds.min_lat, event.bounds.max_lon,
            event.bounds.max_lat, scale
        );
    }
}

/// Remember the current view as the next session's startup view.
pub fn persist_view_on_close(
    mut close_events: MessageReader<WindowCloseRequested>,
    camera_query: Query<(&Transform, &CameraZoom), With<MapCamera>>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for _ in close_events.read() {
        let Ok((transform, zoom)) = camera_query.single() else {
            continue;
        };
        let center = world_to_lnglat(transform.translation.truncate());
        config.data.start_center = center.to_array();
        config.data.start_scale = zoom.scale;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<FitBoundsRequest>()
            .add_systems(Startup, spawn_camera.after(ConfigLoaded))
            .add_systems(
                Update,
                (camera_pan, camera_zoom, apply_camera_zoom, persist_view_on_close),
            )
            .add_systems(Update, apply_fit_bounds.after(SyncSet::Commands));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_roundtrip() {
        let p = DVec2::new(37.6173, 55.7558);
        let back = world_to_lnglat(lnglat_to_world(p));
        assert!((back.x - p.x).abs() < 1e-4);
        assert!((back.y - p.y).abs() < 1e-4);
    }

    #[test]
    fn test_projection_scales_by_degree_constant() {
        let world = lnglat_to_world(DVec2::new(1.0, -1.0));
        assert_eq!(world.x, WORLD_UNITS_PER_DEGREE as f32);
        assert_eq!(world.y, -(WORLD_UNITS_PER_DEGREE as f32));
    }
}
