use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use docscan_core::config::AppConfig;
use docscan_core::error::ScanError;
use docscan_core::identity::{Identity, IdentityProvider};
use docscan_core::media::SourceFile;
use docscan_core::upload::{Phase, UploadJob};
use tracing::debug;

use crate::messages::{FileInput, WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, View, ViewerPair};
use crate::workers;

/// Repaint interval while a completed job waits for its reset.
const COMPLETE_REPAINT: Duration = Duration::from_millis(250);

pub struct DocScanApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub config: AppConfig,
    pub identity: Option<Identity>,
    /// Lives on the UI thread; only its upload plans go to the worker.
    pub job: UploadJob,
    pub ui_state: UIState,
    pub upload_views: ViewerPair,
    pub document_views: ViewerPair,
}

impl DocScanApp {
    pub fn new(ctx: &egui::Context, config: AppConfig, config_path: Option<PathBuf>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone());

        let mut app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            identity: None,
            config: AppConfig::default(),
            job: UploadJob::new(),
            ui_state: UIState::default(),
            upload_views: ViewerPair::default(),
            document_views: ViewerPair::default(),
        };
        app.apply_config(config, config_path);
        app
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Configured { description } => {
                    self.ui_state.add_log(format!("Using {description}"));
                    self.ui_state.backend_label = description;
                }
                WorkerResult::FilePicked { path } => {
                    self.start_prepare(FileInput::Path(path));
                }
                WorkerResult::Prepared { job, error } => {
                    self.job = *job;
                    self.ui_state.preparing = false;
                    if let Some(error) = error {
                        self.ui_state.add_log(format!("ERROR: {error}"));
                    }
                    self.refresh_upload_views(ctx);
                }
                WorkerResult::UploadStep { attempt, step } => {
                    if self.job.is_uploading() && attempt == self.job.attempt() {
                        self.ui_state.upload_step = Some(step);
                    }
                }
                WorkerResult::UploadProgress { attempt, percent } => {
                    self.job.set_progress(attempt, percent);
                }
                WorkerResult::UploadFinished { outcome } => {
                    let stored = outcome.result.is_ok();
                    if self.job.finish_upload(outcome, Instant::now()) {
                        self.ui_state.upload_step = None;
                        if let Some(message) = self.job.message() {
                            self.ui_state.add_log(message.text.clone());
                        }
                        if stored {
                            self.refresh_gallery();
                        }
                    } else {
                        debug!("Dropped result of an abandoned upload");
                    }
                }
                WorkerResult::GalleryLoaded { state } => {
                    self.ui_state.gallery = Some(state);
                    self.ui_state.gallery_loading = false;
                    self.ui_state.gallery_error = None;
                }
                WorkerResult::GalleryFailed { message } => {
                    self.ui_state.gallery_loading = false;
                    self.ui_state.gallery_error = Some(message);
                }
                WorkerResult::DocumentOpened {
                    record_id,
                    original,
                    processed,
                } => {
                    let is_current = self
                        .ui_state
                        .open_document
                        .as_ref()
                        .is_some_and(|r| r.id == record_id);
                    if is_current {
                        if let Some(ref raster) = original {
                            self.document_views
                                .original
                                .set_image(ctx, "document-original", raster);
                        }
                        if let Some(ref raster) = processed {
                            self.document_views
                                .processed
                                .set_image(ctx, "document-processed", raster);
                        }
                    }
                }
                WorkerResult::ConfigImported { config, path } => {
                    self.ui_state.add_log(format!("Imported config {}", path.display()));
                    self.apply_config(config, Some(path));
                }
                WorkerResult::ImageExported { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn refresh_upload_views(&mut self, ctx: &egui::Context) {
        self.upload_views.clear();
        if let Some(raster) = self.job.rendered() {
            self.upload_views
                .original
                .set_image(ctx, "upload-original", raster);
        }
        if let Some(raster) = self.job.transformed() {
            self.upload_views
                .processed
                .set_image(ctx, "upload-processed", raster);
        }
    }

    /// Hand a file to the worker. Only an idle job accepts a new file.
    pub fn start_prepare(&mut self, input: FileInput) {
        if self.ui_state.preparing || self.job.phase() != Phase::Idle {
            self.ui_state
                .add_log("Save or cancel the current document first".into());
            return;
        }
        let job = std::mem::take(&mut self.job);
        self.ui_state.preparing = true;
        self.ui_state.view = View::Upload;
        self.send_command(WorkerCommand::Prepare {
            job: Box::new(job),
            input,
        });
    }

    /// Save the current job. A second request while uploading is ignored.
    pub fn start_upload(&mut self) {
        if self.ui_state.preparing {
            return;
        }
        match self.job.begin_upload(self.identity.as_ref()) {
            Ok(plan) => {
                self.ui_state.upload_step = None;
                self.send_command(WorkerCommand::Upload { plan });
            }
            Err(ScanError::UploadInFlight) => {}
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    pub fn cancel_job(&mut self) {
        if self.ui_state.preparing {
            return;
        }
        if self.job.cancel().is_ok() {
            self.upload_views.clear();
            self.ui_state.upload_step = None;
        }
    }

    pub fn refresh_gallery(&mut self) {
        self.ui_state.gallery_loading = true;
        self.send_command(WorkerCommand::LoadGallery {
            identity: self.identity.clone(),
        });
    }

    pub fn open_document(&mut self, record: docscan_core::store::DocumentRecord) {
        self.document_views.clear();
        self.ui_state.open_document = Some(record.clone());
        self.send_command(WorkerCommand::OpenDocument { record });
    }

    pub fn close_document(&mut self) {
        self.ui_state.open_document = None;
        self.document_views.clear();
    }

    pub fn apply_config(&mut self, config: AppConfig, path: Option<PathBuf>) {
        self.identity = config.identity_provider().current();
        self.config = config;
        self.ui_state.config_path = path;
        self.ui_state.gallery = None;
        self.close_document();
        self.send_command(WorkerCommand::Configure {
            config: self.config.clone(),
        });
        self.refresh_gallery();
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        let input = if let Some(path) = file.path {
            FileInput::Path(path)
        } else if let Some(bytes) = file.bytes {
            FileInput::Loaded(SourceFile::new(file.name, file.mime, bytes.to_vec()))
        } else {
            return;
        };
        self.start_prepare(input);
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for DocScanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);
        self.handle_dropped_files(ctx);

        if self.job.tick(Instant::now(), self.config.upload.reset_delay()) {
            self.upload_views.clear();
            self.ui_state.add_log("Ready for the next document".into());
        }
        if self.job.phase() == Phase::Complete {
            ctx.request_repaint_after(COMPLETE_REPAINT);
        }

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        match self.ui_state.view {
            View::Upload => panels::upload::show(ctx, self),
            View::Gallery => panels::gallery::show(ctx, self),
        }

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About DocScan")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("DocScan");
                        ui.label("Document scanning and upload");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
