use std::path::PathBuf;

use docscan_core::gallery::GalleryState;
use docscan_core::store::DocumentRecord;
use docscan_core::upload::UploadStep;

/// Which page the central panel shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Upload,
    Gallery,
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub view: View,
    pub config_path: Option<PathBuf>,
    /// Backend and transform as reported by the worker.
    pub backend_label: String,

    /// The job is on the worker being rendered and transformed.
    pub preparing: bool,
    /// Step of the running upload attempt, for the progress label.
    pub upload_step: Option<UploadStep>,

    pub gallery: Option<GalleryState>,
    pub gallery_loading: bool,
    pub gallery_error: Option<String>,
    /// Gallery document currently shown in the viewer.
    pub open_document: Option<DocumentRecord>,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
