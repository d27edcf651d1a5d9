use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::consts::{JPEG_QUALITY, PROCESSED_MEDIA_TYPE, PROGRESS_COMPLETE};
use crate::error::{Result, ScanError};
use crate::identity::Identity;
use crate::media::SourceFile;
use crate::raster::RasterImage;
use crate::render::{rasterize, PageRenderer};
use crate::store::DocumentRecord;
use crate::transform::DocumentTransform;

use super::types::{
    JobMessage, Phase, UploadOutcome, UploadPlan, MSG_PROCESS_FIRST, MSG_RENDER_FAILED,
    MSG_TRANSFORM_FAILED, MSG_UNSUPPORTED_TYPE, MSG_UPLOAD_SUCCESS,
};

/// One document moving from drop to stored record.
///
/// Every transition is a method; methods that are not valid in the current
/// phase return an error and leave the job untouched (apart from the
/// user-visible message where one is required).
#[derive(Debug, Default)]
pub struct UploadJob {
    phase: Phase,
    source: Option<SourceFile>,
    rendered: Option<RasterImage>,
    transformed: Option<RasterImage>,
    progress: f32,
    message: Option<JobMessage>,
    completed_at: Option<Instant>,
    record: Option<DocumentRecord>,
    attempt: u64,
}

impl UploadJob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn source(&self) -> Option<&SourceFile> {
        self.source.as_ref()
    }

    pub fn rendered(&self) -> Option<&RasterImage> {
        self.rendered.as_ref()
    }

    pub fn transformed(&self) -> Option<&RasterImage> {
        self.transformed.as_ref()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn message(&self) -> Option<&JobMessage> {
        self.message.as_ref()
    }

    pub fn record(&self) -> Option<&DocumentRecord> {
        self.record.as_ref()
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn is_uploading(&self) -> bool {
        self.phase == Phase::Uploading
    }

    /// Whether a progress bar belongs on screen: while uploading, and
    /// pinned at 100 once complete.
    pub fn shows_progress(&self) -> bool {
        matches!(self.phase, Phase::Uploading | Phase::Complete)
    }

    /// Whether the save action should be enabled.
    pub fn can_save(&self) -> bool {
        self.phase == Phase::Transformed && self.transformed.is_some()
    }

    /// Whether the cancel action should be enabled.
    pub fn can_cancel(&self) -> bool {
        !matches!(self.phase, Phase::Idle | Phase::Uploading)
    }

    /// Idle → Rendering, or → Failed for an unsupported media type.
    pub fn accept_file(&mut self, file: SourceFile) -> Result<()> {
        if self.phase != Phase::Idle {
            return Err(ScanError::Precondition(format!(
                "Cannot accept a new file while {}",
                self.phase
            )));
        }

        let Some(media) = file.media_type() else {
            warn!(file = %file.name, declared = %file.declared_type, "Unsupported file type");
            let declared = file.declared_type.clone();
            self.source = Some(file);
            self.fail(JobMessage::error(MSG_UNSUPPORTED_TYPE));
            return Err(ScanError::UnsupportedMediaType(declared));
        };

        info!(file = %file.name, media = %media, size = file.bytes.len(), "Accepted file");
        self.source = Some(file);
        self.message = None;
        self.phase = Phase::Rendering;
        Ok(())
    }

    /// Produce the rendered raster. Stays in Rendering until transformed.
    pub fn render(&mut self, renderer: &dyn PageRenderer, page_index: u16, scale: f32) -> Result<()> {
        if self.phase != Phase::Rendering || self.rendered.is_some() {
            return Err(ScanError::Precondition(format!(
                "Cannot render while {}",
                self.phase
            )));
        }
        let Some(source) = self.source.as_ref() else {
            return Err(ScanError::Precondition("No file to render".into()));
        };

        match rasterize(source, renderer, page_index, scale) {
            Ok(raster) => {
                self.rendered = Some(raster);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Rendering failed");
                self.fail(JobMessage::error(MSG_RENDER_FAILED));
                Err(e)
            }
        }
    }

    /// Run the transform exactly once: Rendering → Transformed.
    pub fn apply_transform(&mut self, transform: &dyn DocumentTransform) -> Result<()> {
        if self.phase != Phase::Rendering || self.transformed.is_some() {
            return Err(ScanError::Precondition(format!(
                "Cannot transform while {}",
                self.phase
            )));
        }
        let Some(rendered) = self.rendered.as_ref() else {
            return Err(ScanError::Precondition("No rendered image to process".into()));
        };

        match transform.apply(rendered) {
            Ok(processed) => {
                debug!(transform = transform.name(), "Transform complete");
                self.transformed = Some(processed);
                self.phase = Phase::Transformed;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, transform = transform.name(), "Transform failed");
                self.fail(JobMessage::error(MSG_TRANSFORM_FAILED));
                Err(e)
            }
        }
    }

    /// Transformed → Uploading. Returns the plan for the executor.
    ///
    /// A second call while Uploading is refused without touching the job.
    pub fn begin_upload(&mut self, identity: Option<&Identity>) -> Result<UploadPlan> {
        if self.phase == Phase::Uploading {
            debug!(attempt = self.attempt, "Save ignored: upload in flight");
            return Err(ScanError::UploadInFlight);
        }

        let ready = self.phase == Phase::Transformed;
        let (Some(identity), Some(source), Some(processed), true) =
            (identity, self.source.as_ref(), self.transformed.as_ref(), ready)
        else {
            self.message = Some(JobMessage::error(MSG_PROCESS_FIRST));
            return Err(ScanError::Precondition(MSG_PROCESS_FIRST.into()));
        };

        let processed_bytes = match processed.encode_jpeg(JPEG_QUALITY) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Processed image could not be encoded");
                self.message = Some(JobMessage::error(MSG_TRANSFORM_FAILED));
                return Err(e);
            }
        };
        let plan = UploadPlan {
            attempt: self.attempt + 1,
            owner_id: identity.user_id.clone(),
            file_name: source.name.clone(),
            file_type: source.declared_type.clone(),
            original_bytes: source.bytes.clone(),
            processed_bytes,
            processed_media_type: PROCESSED_MEDIA_TYPE.to_string(),
            timestamp_millis: chrono::Utc::now().timestamp_millis(),
        };

        self.attempt = plan.attempt;
        self.phase = Phase::Uploading;
        self.progress = 0.0;
        self.message = None;
        info!(attempt = plan.attempt, owner = %plan.owner_id, file = %plan.file_name, "Upload started");
        Ok(plan)
    }

    /// Record progress for the running attempt. Never moves backwards.
    pub fn set_progress(&mut self, attempt: u64, percent: f32) {
        if self.phase != Phase::Uploading || attempt != self.attempt || !percent.is_finite() {
            return;
        }
        self.progress = self.progress.max(percent.clamp(0.0, PROGRESS_COMPLETE));
    }

    /// Uploading → Complete or Failed. Outcomes of other attempts, or
    /// arriving after the job was reset, are ignored and `false` is returned.
    pub fn finish_upload(&mut self, outcome: UploadOutcome, now: Instant) -> bool {
        if self.phase != Phase::Uploading || outcome.attempt != self.attempt {
            debug!(attempt = outcome.attempt, "Discarding stale upload outcome");
            return false;
        }

        match outcome.result {
            Ok(record) => {
                info!(id = %record.id, "Upload complete");
                self.phase = Phase::Complete;
                self.progress = PROGRESS_COMPLETE;
                self.completed_at = Some(now);
                self.record = Some(record);
                self.message = Some(JobMessage::success(MSG_UPLOAD_SUCCESS));
            }
            Err(failure) => {
                warn!(step = %failure.step, error = %failure.source, "Upload failed");
                self.fail(JobMessage::error(failure.user_message()));
            }
        }
        true
    }

    /// Complete → Idle once `reset_delay` has passed. Returns true on reset.
    pub fn tick(&mut self, now: Instant, reset_delay: Duration) -> bool {
        let Some(done_at) = self.completed_at else {
            return false;
        };
        if self.phase == Phase::Complete && now.saturating_duration_since(done_at) >= reset_delay {
            debug!("Resetting completed job");
            self.clear();
            return true;
        }
        false
    }

    /// Discard the job. Refused while an upload is in flight.
    pub fn cancel(&mut self) -> Result<()> {
        if self.phase == Phase::Uploading {
            return Err(ScanError::UploadInFlight);
        }
        self.clear();
        Ok(())
    }

    fn fail(&mut self, message: JobMessage) {
        self.phase = Phase::Failed;
        self.message = Some(message);
    }

    /// Back to Idle with every field cleared. The attempt counter survives so
    /// late outcomes from earlier attempts stay recognizable as stale.
    fn clear(&mut self) {
        let attempt = self.attempt;
        *self = Self::default();
        self.attempt = attempt;
    }
}
