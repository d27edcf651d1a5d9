use std::sync::mpsc;

use docscan_core::upload::UploadSequencer;

use crate::messages::{WorkerCommand, WorkerResult};

use super::{config, documents, io, upload};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("docscan-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut sequencer: Option<UploadSequencer> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Configure { config } => {
                sequencer = config::handle_configure(&config, &tx, &ctx);
            }
            WorkerCommand::Prepare { job, input } => {
                upload::handle_prepare(job, input, sequencer.as_ref(), &tx, &ctx);
            }
            WorkerCommand::Upload { plan } => {
                upload::handle_upload(&plan, sequencer.as_ref(), &tx, &ctx);
            }
            WorkerCommand::LoadGallery { identity } => {
                documents::handle_load_gallery(identity.as_ref(), sequencer.as_ref(), &tx, &ctx);
            }
            WorkerCommand::OpenDocument { record } => {
                documents::handle_open_document(&record, sequencer.as_ref(), &tx, &ctx);
            }
            WorkerCommand::ExportImage { path, image } => {
                io::handle_export_image(&path, &image, &tx, &ctx);
            }
        }
    }
}
