use docscan_core::upload::{MessageKind, Phase};

use crate::app::DocScanApp;
use crate::messages::WorkerCommand;

use super::{menu_bar, section_header, viewer};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);
const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 190, 110);

pub fn show(ctx: &egui::Context, app: &mut DocScanApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        section_header(ui, "Upload Document", Some(&app.job.phase().to_string()));
        ui.separator();

        if app.ui_state.preparing {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Processing document...");
            });
            return;
        }

        show_message(ui, app);

        if app.job.rendered().is_none() {
            drop_zone(ui, app);
            return;
        }

        actions(ui, app);
        if app.job.shows_progress() {
            upload_progress(ui, app);
        }
        ui.add_space(4.0);
        viewer::show_pair(ui, "upload", &mut app.upload_views);
    });
}

fn show_message(ui: &mut egui::Ui, app: &DocScanApp) {
    let Some(message) = app.job.message() else {
        return;
    };
    let color = match message.kind {
        MessageKind::Error => ERROR_COLOR,
        MessageKind::Success => SUCCESS_COLOR,
    };
    ui.label(egui::RichText::new(&message.text).color(color).strong());
    ui.add_space(4.0);
}

fn drop_zone(ui: &mut egui::Ui, app: &mut DocScanApp) {
    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
    let fill = if hovering {
        egui::Color32::from_gray(55)
    } else {
        egui::Color32::from_gray(35)
    };

    egui::Frame::new()
        .fill(fill)
        .corner_radius(6.0)
        .inner_margin(32.0)
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(ui.available_width(), 220.0));
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(
                    egui::RichText::new("Drop a PNG, JPEG or PDF here")
                        .size(18.0)
                        .color(egui::Color32::from_gray(160)),
                );
                ui.add_space(8.0);
                if app.job.phase() == Phase::Failed {
                    if ui.button("Clear").clicked() {
                        app.cancel_job();
                    }
                } else if ui.button("Browse...").clicked() {
                    menu_bar::open_file(app);
                }
            });
        });
}

fn actions(ui: &mut egui::Ui, app: &mut DocScanApp) {
    ui.horizontal(|ui| {
        let save_label = if app.job.is_uploading() {
            "Uploading..."
        } else {
            "Save Document"
        };
        let can_save = app.job.can_save() && app.identity.is_some();
        let save = ui.add_enabled(can_save, egui::Button::new(save_label));
        if app.identity.is_none() {
            save.on_disabled_hover_text("Set an identity in the config to save documents");
        } else if save.clicked() {
            app.start_upload();
        }

        if ui
            .add_enabled(app.job.can_cancel(), egui::Button::new("Cancel"))
            .clicked()
        {
            app.cancel_job();
        }

        if let Some(image) = app.job.transformed() {
            if ui.button("Export...").clicked() {
                let cmd_tx = app.cmd_tx.clone();
                let image = image.clone();
                std::thread::spawn(move || {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("JPEG", &["jpg", "jpeg"])
                        .add_filter("PNG", &["png"])
                        .set_file_name("processed.jpg")
                        .save_file()
                    {
                        let _ = cmd_tx.send(WorkerCommand::ExportImage { path, image });
                    }
                });
            }
        }

        if let Some(source) = app.job.source() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(&source.name);
            });
        }
    });
}

fn upload_progress(ui: &mut egui::Ui, app: &DocScanApp) {
    let percent = app.job.progress();
    let text = match app.ui_state.upload_step {
        Some(step) => format!("{step} ({percent:.0}%)"),
        None => format!("{percent:.0}%"),
    };
    ui.add(
        egui::ProgressBar::new(percent / 100.0)
            .text(text)
            .animate(true),
    );
}
