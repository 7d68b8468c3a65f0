//! egui panels: the control panel with the parcel naming form and the
//! parcel list.

mod control_panel;
mod parcel_list;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::draw::FeatureId;
use crate::sync::{
    CancelDrawingRequest, CommitParcelRequest, DeleteParcelRequest, DrawParcelRequest,
    FocusParcelRequest, RenameParcelRequest, ZoomToParcelRequest,
};

/// All command messages the panels can issue, bundled so the panel systems
/// stay readable.
#[derive(SystemParam)]
pub struct CommandWriters<'w> {
    pub draw: MessageWriter<'w, DrawParcelRequest>,
    pub zoom: MessageWriter<'w, ZoomToParcelRequest>,
    pub commit: MessageWriter<'w, CommitParcelRequest>,
    pub rename: MessageWriter<'w, RenameParcelRequest>,
    pub cancel: MessageWriter<'w, CancelDrawingRequest>,
    pub focus: MessageWriter<'w, FocusParcelRequest>,
    pub delete: MessageWriter<'w, DeleteParcelRequest>,
}

/// Transient state of the naming form. `editing` is set while the form is
/// renaming a committed parcel rather than naming a fresh drawing.
#[derive(Resource, Default)]
pub struct PanelState {
    pub name: String,
    pub editing: Option<FeatureId>,
}

impl PanelState {
    pub fn reset(&mut self) {
        self.name.clear();
        self.editing = None;
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelState>()
            .add_systems(EguiPrimaryContextPass, control_panel::control_panel_ui);
    }
}
