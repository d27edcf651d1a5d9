use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use docscan_core::consts::{PDF_PAGE_INDEX, PDF_RENDER_SCALE};
use docscan_core::media::SourceFile;
use docscan_core::render::{rasterize, PdfiumRenderer};

#[derive(Args)]
pub struct InfoArgs {
    /// Input PNG, JPEG or PDF file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = SourceFile::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    println!("File:        {}", source.name);
    println!("Declared:    {}", source.declared_type);
    let size_kb = source.bytes.len() as f64 / 1024.0;
    println!("Size:        {:.1} KB", size_kb);

    let Some(media) = source.media_type() else {
        println!("Supported:   no (PNG, JPEG or PDF only)");
        return Ok(());
    };
    println!("Format:      {}", media);

    match rasterize(&source, &PdfiumRenderer, PDF_PAGE_INDEX, PDF_RENDER_SCALE) {
        Ok(raster) => {
            let (w, h) = raster.dimensions();
            if media.is_pdf() {
                println!("Page 1:      {}x{} at {}x scale", w, h, PDF_RENDER_SCALE);
            } else {
                println!("Dimensions:  {}x{}", w, h);
            }
        }
        Err(e) => println!("Render:      failed ({e})"),
    }

    Ok(())
}
