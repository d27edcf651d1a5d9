/// Lower bound of the viewer zoom factor.
pub const MIN_ZOOM: f32 = 0.5;

/// Upper bound of the viewer zoom factor.
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom change applied by the zoom in / zoom out buttons.
pub const ZOOM_BUTTON_STEP: f32 = 0.25;

/// Zoom change applied per wheel notch.
pub const ZOOM_WHEEL_STEP: f32 = 0.1;

/// Scale factor used when rasterizing the first page of a PDF.
pub const PDF_RENDER_SCALE: f32 = 1.5;

/// Only the first page of a PDF is captured.
pub const PDF_PAGE_INDEX: u16 = 0;

/// Seconds a completed upload stays on screen before the job resets.
pub const RESET_DELAY_SECS: u64 = 3;

/// Progress (percent) reached when the original upload has finished.
pub const ORIGINAL_UPLOAD_END: f32 = 50.0;

/// Progress (percent) reached when the processed upload has finished.
pub const PROCESSED_UPLOAD_END: f32 = 70.0;

/// Progress (percent) reached once both download URLs are resolved.
pub const URLS_RESOLVED: f32 = 85.0;

/// Progress (percent) of a finished job.
pub const PROGRESS_COMPLETE: f32 = 100.0;

/// Margin of the simulated perspective correction, as a fraction of width.
pub const TRANSFORM_MARGIN_FRACTION: f32 = 0.1;

/// Fill colour behind the simulated document (#f0f0f0).
pub const TRANSFORM_BACKGROUND: [u8; 3] = [0xf0, 0xf0, 0xf0];

/// Border thickness (pixels) drawn around the simulated document.
pub const TRANSFORM_BORDER_WIDTH: u32 = 2;

/// JPEG quality used for processed images.
pub const JPEG_QUALITY: u8 = 92;

/// Chunk size used when writing objects, so byte progress can be reported.
pub const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// Media type of the processed image.
pub const PROCESSED_MEDIA_TYPE: &str = "image/jpeg";
