use std::sync::mpsc;

use docscan_core::consts::PDF_PAGE_INDEX;
use docscan_core::error::Result;
use docscan_core::gallery::{load_gallery, MSG_GALLERY_FAILED};
use docscan_core::identity::Identity;
use docscan_core::media::SourceFile;
use docscan_core::raster::RasterImage;
use docscan_core::render::rasterize;
use docscan_core::store::DocumentRecord;
use docscan_core::upload::UploadSequencer;
use tracing::warn;

use crate::messages::WorkerResult;

use super::{send, send_error};

pub(super) fn handle_load_gallery(
    identity: Option<&Identity>,
    sequencer: Option<&UploadSequencer>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(sequencer) = sequencer else {
        send(
            tx,
            ctx,
            WorkerResult::GalleryFailed {
                message: MSG_GALLERY_FAILED.into(),
            },
        );
        return;
    };

    match load_gallery(sequencer.backend().metadata.as_ref(), identity) {
        Ok(state) => send(tx, ctx, WorkerResult::GalleryLoaded { state }),
        Err(e) => {
            warn!(error = %e, "Gallery load failed");
            send(
                tx,
                ctx,
                WorkerResult::GalleryFailed {
                    message: MSG_GALLERY_FAILED.into(),
                },
            );
        }
    }
}

pub(super) fn handle_open_document(
    record: &DocumentRecord,
    sequencer: Option<&UploadSequencer>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(sequencer) = sequencer else {
        send_error(tx, ctx, "No backend configured");
        return;
    };

    let original = fetch_original(record, sequencer);
    let processed = fetch_processed(record, sequencer);

    if let Err(ref e) = original {
        send_error(tx, ctx, format!("Failed to load original of {}: {e}", record.original_file_name));
    }
    if let Err(ref e) = processed {
        send_error(tx, ctx, format!("Failed to load processed {}: {e}", record.original_file_name));
    }

    send(
        tx,
        ctx,
        WorkerResult::DocumentOpened {
            record_id: record.id.clone(),
            original: original.ok(),
            processed: processed.ok(),
        },
    );
}

/// The original may be a PDF, so it goes through the same rasterization as a drop.
fn fetch_original(record: &DocumentRecord, sequencer: &UploadSequencer) -> Result<RasterImage> {
    let bytes = sequencer.backend().objects.fetch(&record.original_file_url)?;
    let source = SourceFile::new(&record.original_file_name, &record.file_type, bytes);
    let scale = sequencer.settings().pdf_render_scale;
    rasterize(&source, sequencer.renderer(), PDF_PAGE_INDEX, scale)
}

fn fetch_processed(record: &DocumentRecord, sequencer: &UploadSequencer) -> Result<RasterImage> {
    let bytes = sequencer.backend().objects.fetch(&record.processed_file_url)?;
    RasterImage::decode(&bytes)
}
