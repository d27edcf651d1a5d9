use std::sync::mpsc;

use docscan_core::upload::{ProgressReporter, UploadStep};

use crate::messages::WorkerResult;

/// Progress reporter that sends updates over an mpsc channel to the UI thread.
pub struct ChannelProgressReporter {
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    attempt: u64,
}

impl ChannelProgressReporter {
    pub fn new(tx: mpsc::Sender<WorkerResult>, ctx: egui::Context, attempt: u64) -> Self {
        Self { tx, ctx, attempt }
    }
}

impl ProgressReporter for ChannelProgressReporter {
    fn begin_step(&self, step: UploadStep) {
        let _ = self.tx.send(WorkerResult::UploadStep {
            attempt: self.attempt,
            step,
        });
        self.ctx.request_repaint();
    }

    fn progress(&self, percent: f32) {
        let _ = self.tx.send(WorkerResult::UploadProgress {
            attempt: self.attempt,
            percent,
        });
        self.ctx.request_repaint();
    }
}
