use chrono::Utc;
use tracing::{debug, info};

use crate::consts::{ORIGINAL_UPLOAD_END, PROCESSED_UPLOAD_END, PROGRESS_COMPLETE, URLS_RESOLVED};
use crate::store::{DocumentRecord, MetadataStore, NewDocument, ObjectStore};

use super::types::{ProgressReporter, UploadFailure, UploadPlan, UploadStep};

/// Forwards progress to a reporter, never letting it move backwards.
struct ProgressTracker<'a> {
    reporter: &'a dyn ProgressReporter,
    current: f32,
}

impl<'a> ProgressTracker<'a> {
    fn new(reporter: &'a dyn ProgressReporter) -> Self {
        Self {
            reporter,
            current: 0.0,
        }
    }

    fn advance_to(&mut self, percent: f32) {
        let clamped = percent.clamp(0.0, PROGRESS_COMPLETE);
        if clamped > self.current {
            self.current = clamped;
            self.reporter.progress(clamped);
        }
    }

    /// Map `done / total` bytes onto the `[start, end]` percentage band.
    fn advance_bytes(&mut self, start: f32, end: f32, done: u64, total: u64) {
        let fraction = if total == 0 {
            1.0
        } else {
            (done as f64 / total as f64).min(1.0) as f32
        };
        self.advance_to(start + (end - start) * fraction);
    }
}

/// Run one upload attempt.
///
/// Steps run strictly in order: original upload, processed upload, URL
/// resolution, metadata write. The metadata record is only written once
/// both objects exist, so a failed upload never leaves a record behind.
pub fn execute_upload(
    plan: &UploadPlan,
    objects: &dyn ObjectStore,
    metadata: &dyn MetadataStore,
    reporter: &dyn ProgressReporter,
) -> Result<DocumentRecord, UploadFailure> {
    let mut tracker = ProgressTracker::new(reporter);

    let step = UploadStep::OriginalUpload;
    reporter.begin_step(step);
    let original = objects
        .put(
            &plan.original_key(),
            &plan.original_bytes,
            &plan.file_type,
            &mut |done, total| tracker.advance_bytes(0.0, ORIGINAL_UPLOAD_END, done, total),
        )
        .map_err(|e| UploadFailure::new(step, e))?;
    tracker.advance_to(ORIGINAL_UPLOAD_END);
    reporter.finish_step(step);
    debug!(key = %original.key, size = original.size, "Original stored");

    let step = UploadStep::ProcessedUpload;
    reporter.begin_step(step);
    let processed = objects
        .put(
            &plan.processed_key(),
            &plan.processed_bytes,
            &plan.processed_media_type,
            &mut |done, total| {
                tracker.advance_bytes(ORIGINAL_UPLOAD_END, PROCESSED_UPLOAD_END, done, total)
            },
        )
        .map_err(|e| UploadFailure::new(step, e))?;
    tracker.advance_to(PROCESSED_UPLOAD_END);
    reporter.finish_step(step);
    debug!(key = %processed.key, size = processed.size, "Processed stored");

    let step = UploadStep::UrlResolution;
    reporter.begin_step(step);
    let original_url = objects
        .public_url(&original)
        .map_err(|e| UploadFailure::new(step, e))?;
    let processed_url = objects
        .public_url(&processed)
        .map_err(|e| UploadFailure::new(step, e))?;
    tracker.advance_to(URLS_RESOLVED);
    reporter.finish_step(step);

    let step = UploadStep::MetadataWrite;
    reporter.begin_step(step);
    let record = metadata
        .insert(NewDocument {
            owner_id: plan.owner_id.clone(),
            original_file_name: plan.file_name.clone(),
            original_file_url: original_url,
            processed_file_url: processed_url,
            file_type: plan.file_type.clone(),
            created_at: Utc::now(),
        })
        .map_err(|e| UploadFailure::new(step, e))?;
    tracker.advance_to(PROGRESS_COMPLETE);
    reporter.finish_step(step);

    info!(
        id = %record.id,
        owner = %record.owner_id,
        attempt = plan.attempt,
        "Document stored"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<f32>>);

    impl ProgressReporter for Recorder {
        fn progress(&self, percent: f32) {
            self.0.lock().unwrap().push(percent);
        }
    }

    #[test]
    fn tracker_ignores_regressions() {
        let recorder = Recorder::default();
        let mut tracker = ProgressTracker::new(&recorder);
        tracker.advance_to(30.0);
        tracker.advance_to(10.0);
        tracker.advance_to(150.0);
        assert_eq!(*recorder.0.lock().unwrap(), vec![30.0, 100.0]);
    }

    #[test]
    fn empty_object_counts_as_fully_written() {
        let recorder = Recorder::default();
        let mut tracker = ProgressTracker::new(&recorder);
        tracker.advance_bytes(50.0, 70.0, 0, 0);
        assert_eq!(*recorder.0.lock().unwrap(), vec![70.0]);
    }
}
