//! Hover labels: show the parcel name under the cursor.

use bevy::math::DVec2;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::parcel::{Parcel, ParcelStore};
use crate::sync::SyncSet;
use crate::viewport::{is_cursor_over_ui, CameraParams};

#[derive(Resource, Default)]
pub struct HoverLabel {
    pub text: Option<String>,
    pub cursor_pos: Vec2,
}

/// First parcel in store order containing the point. Degenerate rings can
/// contain nothing and are skipped.
fn hover_target(store: &ParcelStore, point: DVec2) -> Option<&Parcel> {
    store.parcels().iter().find(|parcel| {
        if parcel.ring.is_degenerate() {
            warn_once!("parcel {} has a degenerate ring, skipping hover test", parcel.id);
            return false;
        }
        crate::geometry::ring_contains(&parcel.ring, point)
    })
}

fn update_hover(
    mut label: ResMut<HoverLabel>,
    store: Res<ParcelStore>,
    camera: CameraParams,
    mut contexts: EguiContexts,
) {
    label.text = None;

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(point) = camera.cursor_lnglat() else {
        return;
    };
    let Some(screen_pos) = camera.window.single().ok().and_then(Window::cursor_position) else {
        return;
    };

    if let Some(parcel) = hover_target(&store, point) {
        label.text = Some(parcel.name.clone());
        label.cursor_pos = screen_pos;
    }
}

fn hover_label_ui(mut contexts: EguiContexts, label: Res<HoverLabel>) -> Result {
    let ctx = contexts.ctx_mut()?;

    if let Some(text) = &label.text {
        egui::Area::new(egui::Id::new("parcel_hover_label"))
            .fixed_pos(egui::pos2(
                label.cursor_pos.x + 12.0,
                label.cursor_pos.y + 12.0,
            ))
            .order(egui::Order::Tooltip)
            .show(ctx, |ui| {
                egui::Frame::popup(&ctx.style()).show(ui, |ui| {
                    ui.label(text);
                });
            });
    }

    Ok(())
}

pub struct HoverPlugin;

impl Plugin for HoverPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoverLabel>()
            .add_systems(Update, update_hover.after(SyncSet::StoreUpdate))
            .add_systems(EguiPrimaryContextPass, hover_label_ui);
    }
}
