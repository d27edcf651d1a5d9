use std::sync::mpsc;
use std::sync::Arc;

use docscan_core::config::AppConfig;
use docscan_core::render::PdfiumRenderer;
use docscan_core::store::Backend;
use docscan_core::upload::UploadSequencer;

use crate::messages::WorkerResult;

use super::{send, send_error};

/// Build the sequencer for a config. `None` leaves the worker without a
/// backend until a working config arrives.
pub(super) fn handle_configure(
    config: &AppConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Option<UploadSequencer> {
    let backend = match Backend::from_config(&config.backend) {
        Ok(b) => b,
        Err(e) => {
            send_error(tx, ctx, format!("Failed to open backend {}: {e}", config.backend));
            return None;
        }
    };

    let sequencer = UploadSequencer::new(
        Arc::new(PdfiumRenderer),
        Arc::from(config.transform.build()),
        backend,
        config.upload.clone(),
    );
    send(
        tx,
        ctx,
        WorkerResult::Configured {
            description: format!("{} / {}", config.backend, config.transform),
        },
    );
    Some(sequencer)
}
