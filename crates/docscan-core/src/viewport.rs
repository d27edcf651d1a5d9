use std::ops::{Add, Div, Mul, Sub};

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_BUTTON_STEP, ZOOM_WHEEL_STEP};

/// 2D vector in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }
}

/// Whether an input event was handled by the viewport.
///
/// `Consumed` tells the input adapter to suppress the platform's default
/// behaviour for the event (page scrolling, for wheel input).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventDisposition {
    Consumed,
    Ignored,
}

/// Pointer cursor the adapter should show over the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Grab,
    Grabbing,
}

/// Scale and translation to apply to the fitted image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    /// Translation applied after scaling, in unscaled pixels.
    pub translate: Vec2,
}

/// Zoom and pan state of one displayed image.
///
/// Pan is only mutated while a drag is active and the image is zoomed in past
/// 1.0. Pan is not bounded to the image extent.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    zoom: f32,
    pan_offset: Vec2,
    is_dragging: bool,
    drag_anchor: Vec2,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            is_dragging: false,
            drag_anchor: Vec2::ZERO,
        }
    }
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_BUTTON_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_BUTTON_STEP);
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_offset = Vec2::ZERO;
    }

    /// Start panning. Ignored unless zoomed in.
    pub fn begin_drag(&mut self, pointer: Vec2) {
        if !self.is_zoomed_in() {
            return;
        }
        self.drag_anchor = pointer - self.pan_offset;
        self.is_dragging = true;
    }

    pub fn continue_drag(&mut self, pointer: Vec2) {
        if self.is_dragging && self.is_zoomed_in() {
            self.pan_offset = pointer - self.drag_anchor;
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    /// Pointer left the image area; same as releasing the button.
    pub fn pointer_left(&mut self) {
        self.end_drag();
    }

    /// Wheel input. Positive `delta_y` scrolls down and zooms out.
    pub fn on_wheel(&mut self, delta_y: f32) -> EventDisposition {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return EventDisposition::Ignored;
        }
        let step = if delta_y > 0.0 {
            -ZOOM_WHEEL_STEP
        } else {
            ZOOM_WHEEL_STEP
        };
        self.set_zoom(self.zoom + step);
        EventDisposition::Consumed
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn cursor(&self) -> CursorHint {
        match (self.is_zoomed_in(), self.is_dragging) {
            (false, _) => CursorHint::Default,
            (true, false) => CursorHint::Grab,
            (true, true) => CursorHint::Grabbing,
        }
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            scale: self.zoom,
            translate: self.pan_offset / self.zoom,
        }
    }

    /// On-screen rectangle of an image shown inside `container`.
    ///
    /// The image is first fitted (aspect preserved) into the container, then
    /// scaled about the container centre and shifted by the pan offset.
    pub fn display_rect(&self, container: Rect, image_size: Vec2) -> Rect {
        let fitted = fit_contain(container.size, image_size);
        let t = self.transform();
        let center = container.center() + t.translate * t.scale;
        Rect::from_center_size(center, fitted * t.scale)
    }

    fn is_zoomed_in(&self) -> bool {
        self.zoom > 1.0
    }

    /// Snap to hundredths so repeated wheel steps cannot drift off 1.0.
    fn set_zoom(&mut self, zoom: f32) {
        let snapped = (zoom * 100.0).round() / 100.0;
        self.zoom = snapped.clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

/// Largest size with the aspect ratio of `image` that fits in `available`.
fn fit_contain(available: Vec2, image: Vec2) -> Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (available.x / image.x).min(available.y / image.y);
    image * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_contain_keeps_aspect() {
        let fitted = fit_contain(Vec2::new(400.0, 400.0), Vec2::new(800.0, 400.0));
        assert_eq!(fitted, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn fit_contain_degenerate_image() {
        assert_eq!(fit_contain(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::ZERO);
    }
}
