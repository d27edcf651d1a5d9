use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::consts::{PDF_PAGE_INDEX, PDF_RENDER_SCALE, RESET_DELAY_SECS};
use crate::error::Result;
use crate::identity::Identity;
use crate::media::SourceFile;
use crate::render::PageRenderer;
use crate::store::{Backend, DocumentRecord};
use crate::transform::DocumentTransform;

use super::executor::execute_upload;
use super::job::UploadJob;
use super::types::{ProgressReporter, UploadOutcome};

/// Tunables of the upload flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Seconds a completed job stays visible before resetting.
    pub reset_delay_secs: u64,
    /// Scale used when rasterizing the first PDF page.
    pub pdf_render_scale: f32,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            reset_delay_secs: RESET_DELAY_SECS,
            pdf_render_scale: PDF_RENDER_SCALE,
        }
    }
}

impl UploadSettings {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_secs(self.reset_delay_secs)
    }
}

/// Collaborators of the upload flow, bundled for synchronous callers.
#[derive(Clone)]
pub struct UploadSequencer {
    renderer: Arc<dyn PageRenderer>,
    transform: Arc<dyn DocumentTransform>,
    backend: Backend,
    settings: UploadSettings,
}

impl UploadSequencer {
    pub fn new(
        renderer: Arc<dyn PageRenderer>,
        transform: Arc<dyn DocumentTransform>,
        backend: Backend,
        settings: UploadSettings,
    ) -> Self {
        Self {
            renderer,
            transform,
            backend,
            settings,
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn renderer(&self) -> &dyn PageRenderer {
        self.renderer.as_ref()
    }

    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    /// Accept a dropped file and render it.
    pub fn ingest(&self, job: &mut UploadJob, file: SourceFile) -> Result<()> {
        job.accept_file(file)?;
        job.render(
            self.renderer.as_ref(),
            PDF_PAGE_INDEX,
            self.settings.pdf_render_scale,
        )
    }

    /// Apply the document transform to the rendered image.
    pub fn process(&self, job: &mut UploadJob) -> Result<()> {
        job.apply_transform(self.transform.as_ref())
    }

    /// Ingest and process in one go.
    pub fn prepare(&self, job: &mut UploadJob, file: SourceFile) -> Result<()> {
        self.ingest(job, file)?;
        self.process(job)
    }

    /// Save a transformed job: begin, run every storage step, finish.
    pub fn save(
        &self,
        job: &mut UploadJob,
        identity: Option<&Identity>,
        reporter: &dyn ProgressReporter,
    ) -> Result<DocumentRecord> {
        let plan = job.begin_upload(identity)?;
        let result = execute_upload(
            &plan,
            self.backend.objects.as_ref(),
            self.backend.metadata.as_ref(),
            reporter,
        );

        let returned = match &result {
            Ok(record) => Ok(record.clone()),
            Err(failure) => Err(failure.to_error()),
        };

        job.finish_upload(
            UploadOutcome {
                attempt: plan.attempt,
                result,
            },
            Instant::now(),
        );
        returned
    }
}
