use std::sync::mpsc;
use std::time::Instant;

use docscan_core::error::ScanError;
use docscan_core::media::SourceFile;
use docscan_core::upload::{
    execute_upload, UploadFailure, UploadJob, UploadOutcome, UploadPlan, UploadSequencer,
    UploadStep,
};

use crate::messages::{FileInput, WorkerResult};
use crate::progress::ChannelProgressReporter;

use super::{send, send_log};

const NO_BACKEND: &str = "No backend configured";

pub(super) fn handle_prepare(
    mut job: Box<UploadJob>,
    input: FileInput,
    sequencer: Option<&UploadSequencer>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(sequencer) = sequencer else {
        send(
            tx,
            ctx,
            WorkerResult::Prepared {
                job,
                error: Some(NO_BACKEND.into()),
            },
        );
        return;
    };

    let source = match input {
        FileInput::Loaded(source) => source,
        FileInput::Path(path) => match SourceFile::from_path(&path) {
            Ok(source) => source,
            Err(e) => {
                send(
                    tx,
                    ctx,
                    WorkerResult::Prepared {
                        job,
                        error: Some(format!("Failed to read {}: {e}", path.display())),
                    },
                );
                return;
            }
        },
    };

    let name = source.name.clone();
    let start = Instant::now();
    let error = match sequencer.prepare(&mut job, source) {
        Ok(()) => {
            send_log(
                tx,
                ctx,
                format!("Processed {name} in {}ms", start.elapsed().as_millis()),
            );
            None
        }
        Err(e) => Some(format!("{name}: {e}")),
    };
    send(tx, ctx, WorkerResult::Prepared { job, error });
}

pub(super) fn handle_upload(
    plan: &UploadPlan,
    sequencer: Option<&UploadSequencer>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let result = match sequencer {
        Some(sequencer) => {
            let reporter = ChannelProgressReporter::new(tx.clone(), ctx.clone(), plan.attempt);
            let backend = sequencer.backend();
            execute_upload(
                plan,
                backend.objects.as_ref(),
                backend.metadata.as_ref(),
                &reporter,
            )
        }
        None => Err(UploadFailure::new(
            UploadStep::OriginalUpload,
            ScanError::Config(NO_BACKEND.into()),
        )),
    };

    send(
        tx,
        ctx,
        WorkerResult::UploadFinished {
            outcome: UploadOutcome {
                attempt: plan.attempt,
                result,
            },
        },
    );
}
