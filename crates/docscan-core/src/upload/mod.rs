//! The staged upload flow.
//!
//! [`UploadJob`] is the state machine; [`execute_upload`] runs the storage
//! steps of one attempt; [`UploadSequencer`] wires both to collaborators for
//! callers that run everything on one thread.

mod executor;
mod job;
mod sequencer;
mod types;

pub use executor::execute_upload;
pub use job::UploadJob;
pub use sequencer::{UploadSequencer, UploadSettings};
pub use types::{
    object_key, JobMessage, MessageKind, NoOpReporter, Phase, ProgressReporter, UploadFailure,
    UploadOutcome, UploadPlan, UploadStep, MSG_PROCESS_FIRST, MSG_RENDER_FAILED,
    MSG_TRANSFORM_FAILED, MSG_UNSUPPORTED_TYPE, MSG_UPLOAD_SUCCESS,
};
