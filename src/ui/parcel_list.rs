//! The committed-parcel list rows.

use bevy_egui::egui;

use crate::parcel::ParcelStore;
use crate::sync::{DeleteParcelRequest, FocusParcelRequest};

use super::{CommandWriters, PanelState};

pub fn parcel_list_section(
    ui: &mut egui::Ui,
    store: &mut ParcelStore,
    panel_state: &mut PanelState,
    commands: &mut CommandWriters,
) {
    ui.add_space(4.0);
    ui.label(egui::RichText::new("Saved parcels").size(14.0).strong());
    ui.add_space(4.0);

    if store.is_empty() {
        ui.label(egui::RichText::new("No parcels yet").size(13.0).weak());
        return;
    }

    let rows: Vec<_> = store
        .parcels()
        .iter()
        .map(|p| (p.id, p.name.clone(), p.area_ha))
        .collect();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (id, name, area_ha) in rows {
            egui::Frame::new()
                .inner_margin(egui::Margin::symmetric(4, 4))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui
                            .selectable_label(false, egui::RichText::new(&name).size(14.0))
                            .on_hover_text("Zoom to this parcel")
                            .clicked()
                        {
                            commands.focus.write(FocusParcelRequest { id });
                        }

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("✕").on_hover_text("Delete").clicked() {
                                commands.delete.write(DeleteParcelRequest { id });
                            }
                            if ui.small_button("Edit").on_hover_text("Rename").clicked() {
                                panel_state.name = name.clone();
                                panel_state.editing = Some(id);
                                store.open_input_panel();
                                commands.focus.write(FocusParcelRequest { id });
                            }
                            ui.label(
                                egui::RichText::new(format!("{area_ha} ha")).size(12.0).weak(),
                            );
                        });
                    });
                });
        }
    });
}
