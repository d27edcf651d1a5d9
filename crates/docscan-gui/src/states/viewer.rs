use docscan_core::raster::RasterImage;
use docscan_core::viewport::ViewportState;

use crate::convert::raster_to_color_image;

/// One displayed image with its own zoom and pan.
#[derive(Default)]
pub struct ImageView {
    pub texture: Option<egui::TextureHandle>,
    pub image_size: Option<[usize; 2]>,
    pub viewport: ViewportState,
}

impl ImageView {
    pub fn set_image(&mut self, ctx: &egui::Context, name: &str, raster: &RasterImage) {
        let image = raster_to_color_image(raster);
        self.image_size = Some(image.size);
        self.texture = Some(ctx.load_texture(name, image, egui::TextureOptions::LINEAR));
        self.viewport.reset();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Original and processed images shown side by side.
#[derive(Default)]
pub struct ViewerPair {
    pub original: ImageView,
    pub processed: ImageView,
}

impl ViewerPair {
    pub fn clear(&mut self) {
        self.original.clear();
        self.processed.clear();
    }
}
