//! The left control panel: draw/zoom buttons, the naming form, and the
//! parcel list.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::constants::MAX_PARCEL_NAME_LEN;
use crate::draw::{DrawMode, DrawSurface};
use crate::parcel::ParcelStore;
use crate::sync::{CancelDrawingRequest, CommitParcelRequest, RenameParcelRequest};

use super::{parcel_list, CommandWriters, PanelState};

pub fn control_panel_ui(
    mut contexts: EguiContexts,
    mut store: ResMut<ParcelStore>,
    mut panel_state: ResMut<PanelState>,
    surface: Res<DrawSurface>,
    mut commands: CommandWriters,
) -> Result {
    // The form state only lives while the panel is open
    if !store.input_panel_open() {
        panel_state.reset();
    }

    egui::SidePanel::left("control_panel")
        .default_width(260.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Parcels").heading().size(18.0));
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);

            let drawing = surface.mode() == DrawMode::DrawPolygon;
            let can_draw = surface.is_ready() && !drawing && !store.input_panel_open();

            if ui
                .add_enabled(
                    can_draw,
                    egui::Button::new("Draw parcel").min_size(egui::vec2(160.0, 24.0)),
                )
                .on_hover_text("Click the map to add boundary points")
                .clicked()
            {
                commands.draw.write(crate::sync::DrawParcelRequest);
            }

            if drawing {
                ui.add_space(2.0);
                ui.label(
                    egui::RichText::new("Click the first point again or press Enter to finish")
                        .size(12.0)
                        .weak(),
                );
            }

            ui.add_space(4.0);

            if ui
                .add_enabled(
                    !store.is_empty() || !surface.get_all().is_empty(),
                    egui::Button::new("Zoom to parcel").min_size(egui::vec2(160.0, 24.0)),
                )
                .on_hover_text("Fit the view to the selected or last drawn parcel")
                .clicked()
            {
                commands.zoom.write(crate::sync::ZoomToParcelRequest);
            }

            if store.input_panel_open() {
                ui.add_space(12.0);
                ui.separator();
                name_form(ui, &mut store, &mut panel_state, &mut commands);
            }

            ui.add_space(12.0);
            ui.separator();
            parcel_list::parcel_list_section(ui, &mut store, &mut panel_state, &mut commands);
        });

    Ok(())
}

fn name_form(
    ui: &mut egui::Ui,
    store: &mut ParcelStore,
    panel_state: &mut PanelState,
    commands: &mut CommandWriters,
) {
    let editing = panel_state.editing;

    let heading = if editing.is_some() {
        "Rename parcel"
    } else {
        "Name the new parcel"
    };
    ui.add_space(4.0);
    ui.label(egui::RichText::new(heading).size(14.0).strong());
    ui.add_space(4.0);

    let area_ha = match editing {
        Some(id) => store.get(id).map(|p| p.area_ha),
        None => store.pending().map(|p| p.area_ha),
    };
    if let Some(area_ha) = area_ha {
        ui.label(egui::RichText::new(format!("~{area_ha} ha")).size(13.0).weak());
        ui.add_space(4.0);
    }

    if ui
        .add(egui::TextEdit::singleline(&mut panel_state.name).hint_text("Parcel name"))
        .changed()
    {
        panel_state.name.truncate(MAX_PARCEL_NAME_LEN);
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let trimmed = panel_state.name.trim();
        let can_save = !trimmed.is_empty();
        let save_label = if editing.is_some() { "Save" } else { "Add" };

        if ui
            .add_enabled(can_save, egui::Button::new(save_label))
            .clicked()
        {
            let name = trimmed.to_string();
            match editing {
                Some(id) => {
                    commands.rename.write(RenameParcelRequest { id, name });
                }
                None => {
                    commands.commit.write(CommitParcelRequest { name });
                }
            }
            panel_state.reset();
        }

        if ui.button("Cancel").clicked() {
            if editing.is_some() {
                store.close_input_panel();
            } else {
                commands.cancel.write(CancelDrawingRequest);
            }
            panel_state.reset();
        }
    });
}
