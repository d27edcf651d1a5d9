use docscan_core::gallery::{GalleryEntry, GalleryState, MSG_GALLERY_EMPTY};

use crate::app::DocScanApp;
use crate::states::View;

use super::{section_header, viewer};

const CARD_WIDTH: f32 = 220.0;

pub fn show(ctx: &egui::Context, app: &mut DocScanApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(record) = app.ui_state.open_document.clone() {
            ui.horizontal(|ui| {
                if ui.button("\u{2190} Back").clicked() {
                    app.close_document();
                }
                ui.strong(&record.original_file_name);
            });
            ui.separator();
            viewer::show_pair(ui, "document", &mut app.document_views);
            return;
        }

        let status = app.ui_state.gallery_loading.then_some("Loading...");
        section_header(ui, "My Documents", status);
        ui.separator();

        if let Some(error) = app.ui_state.gallery_error.clone() {
            ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
            if ui.button("Retry").clicked() {
                app.refresh_gallery();
            }
            return;
        }

        let entries = match app.ui_state.gallery.clone() {
            None => {
                ui.spinner();
                return;
            }
            Some(GalleryState::SignedOut) => {
                placeholder(ui, "Sign in to view your documents");
                ui.small("Set [identity] in the config and import it from the File menu.");
                return;
            }
            Some(GalleryState::Empty) => {
                placeholder(ui, MSG_GALLERY_EMPTY);
                if ui.button("Upload your first document").clicked() {
                    app.ui_state.view = View::Upload;
                }
                return;
            }
            Some(GalleryState::Loaded(entries)) => entries,
        };

        let mut opened = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for entry in &entries {
                    if card(ui, entry) {
                        opened = Some(entry.record.clone());
                    }
                }
            });
        });
        if let Some(record) = opened {
            app.open_document(record);
        }
    });
}

/// One document card. Returns true when "View" was clicked.
fn card(ui: &mut egui::Ui, entry: &GalleryEntry) -> bool {
    let mut clicked = false;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            ui.add(egui::Label::new(egui::RichText::new(entry.title()).strong()).truncate());
            ui.small(entry.display_date());
            ui.small(&entry.record.file_type);
            clicked = ui.button("View").clicked();
        });
    });
    clicked
}

fn placeholder(ui: &mut egui::Ui, text: &str) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(140)),
        );
    });
    ui.add_space(8.0);
}
