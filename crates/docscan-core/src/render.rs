//! Turning a dropped file into a raster image.
//!
//! JPEG and PNG are decoded directly. PDFs go through a [`PageRenderer`];
//! only the first page is captured, at a fixed scale.

use std::path::PathBuf;

use pdfium_render::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, ScanError};
use crate::media::{MediaType, SourceFile};
use crate::raster::RasterImage;

/// Rasterizes one page of a PDF.
pub trait PageRenderer: Send + Sync {
    fn render_page(&self, pdf_bytes: &[u8], page_index: u16, scale: f32) -> Result<RasterImage>;
}

/// Produce the raster for a source file.
pub fn rasterize(
    source: &SourceFile,
    renderer: &dyn PageRenderer,
    page_index: u16,
    scale: f32,
) -> Result<RasterImage> {
    let media = source
        .media_type()
        .ok_or_else(|| ScanError::UnsupportedMediaType(source.declared_type.clone()))?;

    let raster = match media {
        MediaType::Pdf => renderer.render_page(&source.bytes, page_index, scale)?,
        MediaType::Jpeg | MediaType::Png => RasterImage::decode(&source.bytes)?,
    };

    info!(
        file = %source.name,
        media = %media,
        width = raster.width(),
        height = raster.height(),
        "Rendered source"
    );
    Ok(raster)
}

/// Renders PDF pages through Google PDFium.
///
/// The library handle is loaded per call because the upstream `Pdfium` type
/// is neither `Send` nor `Sync`; the OS caches the dynamic library load.
pub struct PdfiumRenderer;

/// Load the PDFium dynamic library.
///
/// Discovery order:
/// 1. `PDFIUM_DYNAMIC_LIB_PATH` env var (explicit path to the library file)
/// 2. Next to the running executable, or its `pdfium/` subdirectory
/// 3. System library search paths
fn load_pdfium() -> Result<Pdfium> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        let bindings = Pdfium::bind_to_library(&path)
            .map_err(|e| ScanError::Pdf(format!("Failed to load PDFium from {path}: {e}")))?;
        return Ok(Pdfium::new(bindings));
    }

    for dir in executable_dirs() {
        let lib_path = Pdfium::pdfium_platform_library_name_at_path(&dir);
        if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
            debug!(path = %lib_path.display(), "Loaded PDFium next to executable");
            return Ok(Pdfium::new(bindings));
        }
    }

    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| ScanError::Pdf(format!("PDFium library not found: {e}")))?;
    Ok(Pdfium::new(bindings))
}

fn executable_dirs() -> Vec<PathBuf> {
    let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
    else {
        return Vec::new();
    };
    vec![exe_dir.clone(), exe_dir.join("pdfium")]
}

impl PageRenderer for PdfiumRenderer {
    fn render_page(&self, pdf_bytes: &[u8], page_index: u16, scale: f32) -> Result<RasterImage> {
        let pdfium = load_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(|e| ScanError::Pdf(format!("Failed to load PDF: {e}")))?;

        let pages = document.pages();
        let page = pages.get(page_index).map_err(|_| {
            ScanError::Pdf(format!(
                "Page {page_index} out of range (document has {} pages)",
                pages.len()
            ))
        })?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| ScanError::Pdf(format!("Rendering page {page_index} failed: {e}")))?;

        let raster = RasterImage::from_dynamic(bitmap.as_image());
        debug!(
            page = page_index,
            scale,
            width = raster.width(),
            height = raster.height(),
            "Rendered PDF page"
        );
        Ok(raster)
    }
}
