//! The sync controller: the state machine coupling the drawing surface and
//! the parcel store.
//!
//! Two directions of synchronization, never interleaved:
//!
//! 1. surface events ([`FeatureCreated`](crate::draw::FeatureCreated) /
//!    `FeatureUpdated` / `FeatureDeleted`) flow into the store first
//!    ([`SyncSet::StoreUpdate`]),
//! 2. then UI command requests flow out to the surface and the viewport
//!    ([`SyncSet::Commands`]).
//!
//! The original web version of this tool drove the outbound direction with
//! one-shot booleans in the state store that every handler had to remember
//! to reset; a stuck flag meant an infinitely re-entered draw mode or a
//! permanently pending zoom. Here each command is a message, consumed
//! exactly once per reader by construction, which is the property
//! `tests.rs` pins down.

mod controller;

use bevy::prelude::*;

use crate::draw::FeatureId;
use crate::parcel::ParcelStore;

/// Frame ordering for the two synchronization directions. Draw input runs
/// before event handling so a click and its consequences land in one frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncSet {
    /// Pointer input producing surface events
    DrawEvents,
    /// Surface events mutating the store
    StoreUpdate,
    /// Store-derived commands going out to the surface and viewport
    Commands,
}

/// Enter polygon draw mode.
#[derive(Message)]
pub struct DrawParcelRequest;

/// Fit the viewport to one parcel's boundary.
#[derive(Message)]
pub struct FocusParcelRequest {
    pub id: FeatureId,
}

/// Fit the viewport to the clicked parcel, or the most recently drawn one.
#[derive(Message)]
pub struct ZoomToParcelRequest;

/// Name and commit the pending drawing as a parcel.
#[derive(Message)]
pub struct CommitParcelRequest {
    pub name: String,
}

/// Discard the pending drawing and its feature.
#[derive(Message)]
pub struct CancelDrawingRequest;

/// Remove a committed parcel and its feature.
#[derive(Message)]
pub struct DeleteParcelRequest {
    pub id: FeatureId,
}

/// Rename a committed parcel.
#[derive(Message)]
pub struct RenameParcelRequest {
    pub id: FeatureId,
    pub name: String,
}

pub struct SyncPlugin;

impl Plugin for SyncPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParcelStore>()
            .add_message::<DrawParcelRequest>()
            .add_message::<FocusParcelRequest>()
            .add_message::<ZoomToParcelRequest>()
            .add_message::<CommitParcelRequest>()
            .add_message::<CancelDrawingRequest>()
            .add_message::<DeleteParcelRequest>()
            .add_message::<RenameParcelRequest>()
            .configure_sets(
                Update,
                (SyncSet::DrawEvents, SyncSet::StoreUpdate, SyncSet::Commands).chain(),
            )
            .add_systems(
                Update,
                (
                    controller::handle_created,
                    controller::handle_updated,
                    controller::handle_deleted,
                )
                    .chain()
                    .in_set(SyncSet::StoreUpdate),
            )
            .add_systems(
                Update,
                (
                    controller::handle_draw_request.run_if(on_message::<DrawParcelRequest>),
                    controller::handle_commit_request.run_if(on_message::<CommitParcelRequest>),
                    controller::handle_rename_request.run_if(on_message::<RenameParcelRequest>),
                    controller::handle_cancel_request.run_if(on_message::<CancelDrawingRequest>),
                    controller::handle_delete_request.run_if(on_message::<DeleteParcelRequest>),
                    controller::handle_focus_request.run_if(on_message::<FocusParcelRequest>),
                    controller::handle_zoom_request.run_if(on_message::<ZoomToParcelRequest>),
                )
                    .in_set(SyncSet::Commands),
            );
    }
}
