use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use docscan_core::consts::JPEG_QUALITY;
use docscan_core::media::SourceFile;
use docscan_core::raster::RasterImage;
use docscan_core::upload::UploadJob;

use super::{build_sequencer, load_config};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input PNG, JPEG or PDF file
    pub file: PathBuf,

    /// Output image path (.jpg or .png)
    #[arg(short, long, default_value = "processed.jpg")]
    pub output: PathBuf,

    /// Also save the rendered image before the transform
    #[arg(long)]
    pub rendered: Option<PathBuf>,
}

pub fn run(args: &ProcessArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let sequencer = build_sequencer(&config)?;

    let source = SourceFile::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut job = UploadJob::new();
    sequencer.prepare(&mut job, source).map_err(|e| {
        let message = job.message().map(|m| m.text.clone()).unwrap_or_default();
        anyhow::anyhow!("{message} ({e})")
    })?;

    if let (Some(path), Some(rendered)) = (&args.rendered, job.rendered()) {
        save_raster(rendered, path)?;
        println!("Rendered image saved to {}", path.display());
    }

    let processed = job
        .transformed()
        .context("Transform produced no image")?;
    save_raster(processed, &args.output)?;

    let (w, h) = processed.dimensions();
    println!(
        "Processed {} ({}x{}, {})",
        args.file.display(),
        w,
        h,
        config.transform
    );
    println!("Output saved to {}", args.output.display());
    Ok(())
}

fn save_raster(raster: &RasterImage, path: &Path) -> Result<()> {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    let bytes = if is_png {
        raster.encode_png()?
    } else {
        raster.encode_jpeg(JPEG_QUALITY)?
    };
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
