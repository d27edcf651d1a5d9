use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("PDF rendering error: {0}")]
    Pdf(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("{0}")]
    Precondition(String),

    #[error("An upload is already in progress for this document")]
    UploadInFlight,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Metadata store error: {0}")]
    Metadata(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Upload failed during {step}: {message}")]
    Upload {
        step: crate::upload::UploadStep,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
