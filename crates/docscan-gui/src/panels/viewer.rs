//! Zoomable image panes. Pointer input is translated into calls on the
//! core [`ViewportState`]; everything drawn is derived from its queries.

use docscan_core::viewport::{CursorHint, EventDisposition, Rect, Vec2, ViewportState};

use crate::states::{ImageView, ViewerPair};

const MIN_PANE_HEIGHT: f32 = 240.0;

/// Original and processed panes side by side.
pub fn show_pair(ui: &mut egui::Ui, id: &str, pair: &mut ViewerPair) {
    ui.columns(2, |columns| {
        image_pane(
            &mut columns[0],
            &format!("{id}-original"),
            "Original",
            &mut pair.original,
        );
        image_pane(
            &mut columns[1],
            &format!("{id}-processed"),
            "Processed",
            &mut pair.processed,
        );
    });
}

fn image_pane(ui: &mut egui::Ui, id: &str, title: &str, view: &mut ImageView) {
    ui.push_id(id, |ui| {
        zoom_toolbar(ui, title, &mut view.viewport, view.texture.is_some());

        let height = ui.available_height().max(MIN_PANE_HEIGHT);
        let size = egui::vec2(ui.available_width(), height);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
        paint_background(ui, rect);

        let (Some(texture), Some(image_size)) = (view.texture.as_ref(), view.image_size) else {
            show_placeholder(ui, rect);
            return;
        };

        handle_wheel(ui, &response, &mut view.viewport);
        handle_drag(ui, &response, rect, &mut view.viewport);
        set_cursor(ui, &response, &view.viewport);

        let image_size = Vec2::new(image_size[0] as f32, image_size[1] as f32);
        let img_rect = to_egui_rect(view.viewport.display_rect(to_core_rect(rect), image_size));
        ui.painter_at(rect).image(
            texture.id(),
            img_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    });
}

fn zoom_toolbar(ui: &mut egui::Ui, title: &str, viewport: &mut ViewportState, has_image: bool) {
    ui.horizontal(|ui| {
        ui.strong(title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(has_image, egui::Button::new("Reset"))
                .on_hover_text("Reset zoom")
                .clicked()
            {
                viewport.reset();
            }
            if ui
                .add_enabled(has_image && viewport.can_zoom_in(), egui::Button::new("+"))
                .on_hover_text("Zoom in")
                .clicked()
            {
                viewport.zoom_in();
            }
            ui.label(format!("{}%", viewport.zoom_percent()));
            if ui
                .add_enabled(has_image && viewport.can_zoom_out(), egui::Button::new("\u{2212}"))
                .on_hover_text("Zoom out")
                .clicked()
            {
                viewport.zoom_out();
            }
        });
    });
}

/// Wheel zoom. A consumed wheel event must not scroll the surrounding page.
fn handle_wheel(ui: &egui::Ui, response: &egui::Response, viewport: &mut ViewportState) {
    if !response.hovered() {
        return;
    }
    // egui reports wheel-up as positive; the viewport expects page-style
    // deltas where positive means scrolling down.
    let scroll = ui.input(|i| i.raw_scroll_delta.y);
    if viewport.on_wheel(-scroll) == EventDisposition::Consumed {
        ui.ctx().input_mut(|i| {
            i.raw_scroll_delta = egui::Vec2::ZERO;
            i.smooth_scroll_delta = egui::Vec2::ZERO;
        });
    }
}

fn handle_drag(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: egui::Rect,
    viewport: &mut ViewportState,
) {
    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            viewport.begin_drag(to_core_vec(pos));
        }
    }
    if viewport.is_dragging() && response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            viewport.continue_drag(to_core_vec(pos));
        }
    }
    if response.drag_stopped() {
        viewport.end_drag();
    }
    if viewport.is_dragging() && !ui.rect_contains_pointer(rect) {
        viewport.pointer_left();
    }
}

fn set_cursor(ui: &egui::Ui, response: &egui::Response, viewport: &ViewportState) {
    if !response.hovered() && !viewport.is_dragging() {
        return;
    }
    let icon = match viewport.cursor() {
        CursorHint::Default => return,
        CursorHint::Grab => egui::CursorIcon::Grab,
        CursorHint::Grabbing => egui::CursorIcon::Grabbing,
    };
    ui.ctx().set_cursor_icon(icon);
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 4.0, egui::Color32::from_gray(30));
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "No image",
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(100),
    );
}

fn to_core_vec(p: egui::Pos2) -> Vec2 {
    Vec2::new(p.x, p.y)
}

fn to_core_rect(r: egui::Rect) -> Rect {
    Rect::from_min_size(to_core_vec(r.min), Vec2::new(r.width(), r.height()))
}

fn to_egui_rect(r: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(r.min.x, r.min.y),
        egui::vec2(r.size.x, r.size.y),
    )
}
