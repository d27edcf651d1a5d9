pub mod config;
pub mod gallery;
pub mod info;
pub mod process;
pub mod upload;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use docscan_core::config::AppConfig;
use docscan_core::render::PdfiumRenderer;
use docscan_core::store::Backend;
use docscan_core::upload::UploadSequencer;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "docscan.toml";

pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = path {
        return AppConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()));
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        debug!(path = %fallback.display(), "Using config from working directory");
        return AppConfig::load(fallback)
            .with_context(|| format!("Failed to read config {}", fallback.display()));
    }
    Ok(AppConfig::default())
}

/// Wire the configured transform and backend into a sequencer.
///
/// PDFium is only loaded when a PDF is actually rendered, so image-only use
/// works without the library installed.
pub fn build_sequencer(config: &AppConfig) -> Result<UploadSequencer> {
    let backend = Backend::from_config(&config.backend)
        .with_context(|| format!("Failed to open backend {}", config.backend))?;
    Ok(UploadSequencer::new(
        Arc::new(PdfiumRenderer),
        Arc::from(config.transform.build()),
        backend,
        config.upload.clone(),
    ))
}
