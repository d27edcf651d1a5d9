use docscan_core::raster::RasterImage;

/// Convert an RGB raster to an egui ColorImage.
pub fn raster_to_color_image(raster: &RasterImage) -> egui::ColorImage {
    let (w, h) = raster.dimensions();
    egui::ColorImage::from_rgb([w as usize, h as usize], raster.pixels.as_raw())
}
