//! Message handlers for both synchronization directions.

use bevy::prelude::*;

use crate::config::AppConfig;
use crate::draw::{
    DrawSurface, FeatureCreated, FeatureDeleted, FeatureUpdated, IntersectionOverlay,
    SelectedParcel,
};
use crate::geometry::{pairwise_intersections, ring_area_hectares, Bounds};
use crate::parcel::{ParcelStore, PendingDrawing};
use crate::viewport::FitBoundsRequest;

use super::{
    CancelDrawingRequest, CommitParcelRequest, DeleteParcelRequest, DrawParcelRequest,
    FocusParcelRequest, RenameParcelRequest, ZoomToParcelRequest,
};

fn refresh_overlay(overlay: &mut IntersectionOverlay, surface: &DrawSurface) {
    overlay.regions = pairwise_intersections(&surface.rings());
    overlay.visible = !overlay.regions.is_empty();
}

/// A ring was just drawn: compute its area, stage it as the pending drawing,
/// and open the naming panel.
pub fn handle_created(
    mut events: MessageReader<FeatureCreated>,
    mut store: ResMut<ParcelStore>,
    mut overlay: ResMut<IntersectionOverlay>,
    surface: Res<DrawSurface>,
) {
    for event in events.read() {
        let area_ha = ring_area_hectares(&event.ring);
        debug!("feature {} drawn, {area_ha} ha", event.id);
        store.set_pending(PendingDrawing {
            feature_id: event.id,
            ring: event.ring.clone(),
            area_ha,
        });
        store.open_input_panel();
        refresh_overlay(&mut overlay, &surface);
    }
}

/// A feature's ring changed on the surface. Committed parcels get their ring
/// and area refreshed; a pending drawing gets its staged copy refreshed.
pub fn handle_updated(
    mut events: MessageReader<FeatureUpdated>,
    mut store: ResMut<ParcelStore>,
    mut overlay: ResMut<IntersectionOverlay>,
    surface: Res<DrawSurface>,
) {
    for event in events.read() {
        let area_ha = ring_area_hectares(&event.ring);
        if store.update_ring(event.id, event.ring.clone()) {
            store.update_area(event.id, area_ha);
        } else if store.pending().is_some_and(|p| p.feature_id == event.id) {
            store.set_pending(PendingDrawing {
                feature_id: event.id,
                ring: event.ring.clone(),
                area_ha,
            });
        }
        refresh_overlay(&mut overlay, &surface);
    }
}

/// A feature left the surface. Recompute overlaps over whatever remains; the
/// overlay stays visible if other features still overlap each other.
pub fn handle_deleted(
    mut events: MessageReader<FeatureDeleted>,
    mut overlay: ResMut<IntersectionOverlay>,
    surface: Res<DrawSurface>,
) {
    if !events.is_empty() {
        events.clear();
        refresh_overlay(&mut overlay, &surface);
    }
}

/// Switch the surface to polygon drawing. While the surface is still loading
/// this is a warn-level no-op, but the request is consumed either way.
pub fn handle_draw_request(
    mut events: MessageReader<DrawParcelRequest>,
    mut surface: ResMut<DrawSurface>,
) {
    for _ in events.read() {
        surface.enter_draw_mode();
    }
}

pub fn handle_commit_request(
    mut events: MessageReader<CommitParcelRequest>,
    mut store: ResMut<ParcelStore>,
) {
    for event in events.read() {
        match store.commit(event.name.clone()) {
            Some(id) => info!("committed parcel {id} ({})", event.name),
            None => warn!("commit requested with no pending drawing"),
        }
    }
}

pub fn handle_rename_request(
    mut events: MessageReader<RenameParcelRequest>,
    mut store: ResMut<ParcelStore>,
) {
    for event in events.read() {
        if store.rename(event.id, event.name.clone()) {
            store.close_input_panel();
        } else {
            warn!("rename requested for unknown parcel {}", event.id);
        }
    }
}

/// Abandon the pending drawing: its feature comes off the surface and the
/// naming panel closes. Downstream listeners still see a `FeatureDeleted`.
pub fn handle_cancel_request(
    mut events: MessageReader<CancelDrawingRequest>,
    mut store: ResMut<ParcelStore>,
    mut surface: ResMut<DrawSurface>,
    mut overlay: ResMut<IntersectionOverlay>,
    mut deleted: MessageWriter<FeatureDeleted>,
) {
    for _ in events.read() {
        if let Some(pending) = store.take_pending() {
            if surface.delete_feature(pending.feature_id) {
                deleted.write(FeatureDeleted {
                    id: pending.feature_id,
                });
            }
        }
        store.close_input_panel();
        overlay.clear();
    }
}

pub fn handle_delete_request(
    mut events: MessageReader<DeleteParcelRequest>,
    mut store: ResMut<ParcelStore>,
    mut surface: ResMut<DrawSurface>,
    mut overlay: ResMut<IntersectionOverlay>,
    mut selected: ResMut<SelectedParcel>,
    mut deleted: MessageWriter<FeatureDeleted>,
) {
    for event in events.read() {
        if !store.remove(event.id) {
            warn!("delete requested for unknown parcel {}", event.id);
            continue;
        }
        if surface.delete_feature(event.id) {
            deleted.write(FeatureDeleted { id: event.id });
        }
        if selected.0 == Some(event.id) {
            selected.0 = None;
        }
        overlay.clear();
        info!("deleted parcel {}", event.id);
    }
}

pub fn handle_focus_request(
    mut events: MessageReader<FocusParcelRequest>,
    surface: Res<DrawSurface>,
    config: Res<AppConfig>,
    mut fit: MessageWriter<FitBoundsRequest>,
) {
    for event in events.read() {
        let Some(feature) = surface.feature(event.id) else {
            warn!("focus requested for unknown feature {}", event.id);
            continue;
        };
        if let Some(bounds) = Bounds::of_ring(&feature.ring) {
            fit.write(FitBoundsRequest {
                bounds,
                padding_px: config.data.fit_padding_px,
            });
        }
    }
}

/// Fit the view to the selected parcel, falling back to the most recently
/// drawn feature when nothing is selected.
pub fn handle_zoom_request(
    mut events: MessageReader<ZoomToParcelRequest>,
    surface: Res<DrawSurface>,
    selected: Res<SelectedParcel>,
    config: Res<AppConfig>,
    mut fit: MessageWriter<FitBoundsRequest>,
) {
    for _ in events.read() {
        let ring = selected
            .0
            .and_then(|id| surface.feature(id))
            .map(|f| &f.ring)
            .or_else(|| surface.get_all().last().map(|f| &f.ring));

        let Some(ring) = ring else {
            debug!("zoom requested with nothing drawn");
            continue;
        };
        if let Some(bounds) = Bounds::of_ring(ring) {
            fit.write(FitBoundsRequest {
                bounds,
                padding_px: config.data.fit_padding_px,
            });
        }
    }
}
