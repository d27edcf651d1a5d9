use std::path::PathBuf;

use docscan_core::config::AppConfig;
use docscan_core::gallery::GalleryState;
use docscan_core::identity::Identity;
use docscan_core::media::SourceFile;
use docscan_core::raster::RasterImage;
use docscan_core::store::DocumentRecord;
use docscan_core::upload::{UploadJob, UploadOutcome, UploadPlan, UploadStep};

/// A file handed over by a drop or the open dialog.
pub enum FileInput {
    /// Native drop or dialog: read on the worker.
    Path(PathBuf),
    /// Drop that already carries its bytes.
    Loaded(SourceFile),
}

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Rebuild backend, renderer and transform from a config.
    Configure { config: AppConfig },

    /// Accept, render and transform a file. The job travels to the worker
    /// and back so its attempt counter is preserved.
    Prepare { job: Box<UploadJob>, input: FileInput },

    /// Run every storage step of one upload attempt.
    Upload { plan: UploadPlan },

    /// Query the gallery for an identity.
    LoadGallery { identity: Option<Identity> },

    /// Fetch and decode both images of a stored document.
    OpenDocument { record: DocumentRecord },

    /// Write the processed image of the current job to disk.
    ExportImage { path: PathBuf, image: RasterImage },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    Configured {
        description: String,
    },
    FilePicked {
        path: PathBuf,
    },
    Prepared {
        job: Box<UploadJob>,
        error: Option<String>,
    },
    UploadStep {
        attempt: u64,
        step: UploadStep,
    },
    UploadProgress {
        attempt: u64,
        percent: f32,
    },
    UploadFinished {
        outcome: UploadOutcome,
    },
    GalleryLoaded {
        state: GalleryState,
    },
    GalleryFailed {
        message: String,
    },
    DocumentOpened {
        record_id: String,
        original: Option<RasterImage>,
        processed: Option<RasterImage>,
    },
    ConfigImported {
        config: AppConfig,
        path: PathBuf,
    },
    ImageExported {
        path: PathBuf,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
