use crate::app::DocScanApp;

pub fn show(ctx: &egui::Context, app: &mut DocScanApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            match app.identity {
                Some(ref identity) => ui.label(format!("Signed in: {}", identity.display_name())),
                None => ui.label("Signed out"),
            };
            ui.separator();
            ui.label(format!("Phase: {}", app.job.phase()));
            if let Some(ref size) = app.upload_views.original.image_size {
                ui.separator();
                ui.label(format!("{}x{}", size[0], size[1]));
            }
            if !app.ui_state.backend_label.is_empty() {
                ui.separator();
                ui.label(&app.ui_state.backend_label);
            }
        });

        ui.add_space(2.0);
    });
}
