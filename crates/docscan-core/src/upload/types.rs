use std::fmt;

use crate::error::ScanError;
use crate::store::DocumentRecord;

pub const MSG_UNSUPPORTED_TYPE: &str =
    "Unsupported file type. Please upload a PNG, JPEG, or PDF file.";
pub const MSG_RENDER_FAILED: &str = "Error processing file. Please try again.";
pub const MSG_TRANSFORM_FAILED: &str = "Error processing image. Please try again.";
pub const MSG_PROCESS_FIRST: &str = "Please process an image before uploading";
pub const MSG_UPLOAD_SUCCESS: &str = "Document uploaded successfully!";

/// Lifecycle phase of an upload job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Rendering,
    Transformed,
    Uploading,
    Complete,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Rendering => write!(f, "Rendering"),
            Self::Transformed => write!(f, "Ready to save"),
            Self::Uploading => write!(f, "Uploading"),
            Self::Complete => write!(f, "Complete"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Sub-steps of the Uploading phase, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStep {
    OriginalUpload,
    ProcessedUpload,
    UrlResolution,
    MetadataWrite,
}

impl UploadStep {
    /// Message shown when this step fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::OriginalUpload => "Error uploading original file",
            Self::ProcessedUpload => "Error uploading processed file",
            Self::UrlResolution => "Error resolving file URLs",
            Self::MetadataWrite => "Error saving document metadata",
        }
    }
}

impl fmt::Display for UploadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OriginalUpload => write!(f, "original upload"),
            Self::ProcessedUpload => write!(f, "processed upload"),
            Self::UrlResolution => write!(f, "url resolution"),
            Self::MetadataWrite => write!(f, "metadata write"),
        }
    }
}

/// Severity of the message attached to a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

/// User-visible message attached to a job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl JobMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// Owned snapshot of everything one upload attempt needs.
///
/// Produced by `UploadJob::begin_upload` so the attempt can run on another
/// thread while the job itself stays with its owner.
#[derive(Clone, Debug)]
pub struct UploadPlan {
    /// Attempt number; outcomes of stale attempts are discarded.
    pub attempt: u64,
    pub owner_id: String,
    pub file_name: String,
    pub file_type: String,
    pub original_bytes: Vec<u8>,
    pub processed_bytes: Vec<u8>,
    pub processed_media_type: String,
    /// Milliseconds since the epoch, used to make object keys unique.
    pub timestamp_millis: i64,
}

impl UploadPlan {
    pub fn original_key(&self) -> String {
        object_key(&self.owner_id, self.timestamp_millis, "original", &self.file_name)
    }

    pub fn processed_key(&self) -> String {
        object_key(&self.owner_id, self.timestamp_millis, "processed", &self.file_name)
    }
}

/// `images/{owner}/{millis}_{variant}_{file_name}`, with path separators in
/// the file name replaced.
pub fn object_key(owner_id: &str, millis: i64, variant: &str, file_name: &str) -> String {
    let safe_name: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("images/{owner_id}/{millis}_{variant}_{safe_name}")
}

/// Why an upload attempt failed, and at which step.
#[derive(Debug)]
pub struct UploadFailure {
    pub step: UploadStep,
    pub source: ScanError,
}

impl UploadFailure {
    pub fn new(step: UploadStep, source: ScanError) -> Self {
        Self { step, source }
    }

    pub fn user_message(&self) -> String {
        format!("{}: {}", self.step.failure_message(), self.source)
    }

    /// Error form for callers that propagate with `?`.
    pub fn to_error(&self) -> ScanError {
        ScanError::Upload {
            step: self.step,
            message: self.source.to_string(),
        }
    }
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

/// Result of one upload attempt, tagged with the attempt it belongs to.
#[derive(Debug)]
pub struct UploadOutcome {
    pub attempt: u64,
    pub result: Result<DocumentRecord, UploadFailure>,
}

/// Progress reporting for the upload executor.
///
/// All methods default to no-ops. Percentages are already monotonic and in
/// [0, 100] when they reach the reporter.
pub trait ProgressReporter: Send + Sync {
    fn begin_step(&self, _step: UploadStep) {}

    fn progress(&self, _percent: f32) {}

    fn finish_step(&self, _step: UploadStep) {}
}

/// Reporter that drops every update.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
