use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use docscan_core::consts::JPEG_QUALITY;
use docscan_core::raster::RasterImage;

use crate::messages::WorkerResult;

use super::{send, send_error};

pub(super) fn handle_export_image(
    path: &Path,
    image: &RasterImage,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match export_image(path, image) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::ImageExported {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("{e:#}")),
    }
}

/// PNG when the extension asks for it, JPEG otherwise.
fn export_image(path: &Path, image: &RasterImage) -> Result<()> {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    let bytes = if is_png {
        image.encode_png()?
    } else {
        image.encode_jpeg(JPEG_QUALITY)?
    };
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
