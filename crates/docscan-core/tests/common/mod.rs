#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::{Rgb, RgbImage};

use docscan_core::error::{Result, ScanError};
use docscan_core::media::SourceFile;
use docscan_core::raster::RasterImage;
use docscan_core::render::PageRenderer;
use docscan_core::store::{
    Backend, DocumentRecord, MemoryMetadataStore, MemoryObjectStore, MetadataStore, NewDocument,
    ObjectRef, ObjectStore,
};
use docscan_core::transform::DocumentTransform;
use docscan_core::upload::{ProgressReporter, UploadSequencer, UploadSettings, UploadStep};

/// Build a solid-colour RGB raster.
pub fn solid_raster(width: u32, height: u32, color: [u8; 3]) -> RasterImage {
    RasterImage::new(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Encode a small gradient as PNG bytes.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    });
    RasterImage::new(img).encode_png().unwrap()
}

pub fn png_file(name: &str) -> SourceFile {
    SourceFile::new(name, "image/png", png_bytes(64, 48))
}

pub fn pdf_file(name: &str) -> SourceFile {
    SourceFile::new(name, "application/pdf", b"%PDF-1.4 fake".to_vec())
}

/// Page renderer that records its arguments and returns a fixed raster.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Mutex<Vec<(u16, f32)>>,
    pub fail: bool,
}

impl RecordingRenderer {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(u16, f32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageRenderer for RecordingRenderer {
    fn render_page(&self, _pdf: &[u8], page_index: u16, scale: f32) -> Result<RasterImage> {
        self.calls.lock().unwrap().push((page_index, scale));
        if self.fail {
            return Err(ScanError::Pdf("corrupt document".into()));
        }
        Ok(solid_raster(90, 120, [200, 200, 200]))
    }
}

/// Pass-through transform counting its invocations.
#[derive(Default)]
pub struct CountingTransform {
    pub calls: AtomicUsize,
    pub last_input: Mutex<Option<(u32, u32)>>,
}

impl CountingTransform {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentTransform for CountingTransform {
    fn apply(&self, input: &RasterImage) -> Result<RasterImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input.dimensions());
        Ok(input.clone())
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Object store that fails for keys containing a marker.
pub struct FailingObjectStore {
    pub inner: MemoryObjectStore,
    pub fail_key_containing: Option<&'static str>,
    pub fail_urls: bool,
}

impl FailingObjectStore {
    pub fn failing_on(marker: &'static str) -> Self {
        Self {
            inner: MemoryObjectStore::new(),
            fail_key_containing: Some(marker),
            fail_urls: false,
        }
    }

    pub fn failing_urls() -> Self {
        Self {
            inner: MemoryObjectStore::new(),
            fail_key_containing: None,
            fail_urls: true,
        }
    }
}

impl ObjectStore for FailingObjectStore {
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        media_type: &str,
        on_progress: &mut dyn FnMut(u64, u64),
    ) -> Result<ObjectRef> {
        if let Some(marker) = self.fail_key_containing {
            if key.contains(marker) {
                return Err(ScanError::Storage("network unreachable".into()));
            }
        }
        self.inner.put(key, bytes, media_type, on_progress)
    }

    fn public_url(&self, object: &ObjectRef) -> Result<String> {
        if self.fail_urls {
            return Err(ScanError::Storage("url lookup denied".into()));
        }
        self.inner.public_url(object)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.inner.fetch(url)
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Metadata store whose inserts always fail.
#[derive(Default)]
pub struct FailingMetadataStore {
    pub attempts: AtomicUsize,
}

impl MetadataStore for FailingMetadataStore {
    fn insert(&self, _document: NewDocument) -> Result<DocumentRecord> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ScanError::Metadata("permission denied".into()))
    }

    fn list_by_owner(&self, _owner_id: &str) -> Result<Vec<DocumentRecord>> {
        Err(ScanError::Metadata("permission denied".into()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Reporter that keeps every progress value and step boundary.
#[derive(Default)]
pub struct RecordingReporter {
    pub progress: Mutex<Vec<f32>>,
    pub steps: Mutex<Vec<UploadStep>>,
}

impl RecordingReporter {
    pub fn values(&self) -> Vec<f32> {
        self.progress.lock().unwrap().clone()
    }

    pub fn steps(&self) -> Vec<UploadStep> {
        self.steps.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn begin_step(&self, step: UploadStep) {
        self.steps.lock().unwrap().push(step);
    }

    fn progress(&self, percent: f32) {
        self.progress.lock().unwrap().push(percent);
    }
}

/// Produces an empty image, which no encoder accepts.
pub struct EmptyOutputTransform;

impl DocumentTransform for EmptyOutputTransform {
    fn apply(&self, _input: &RasterImage) -> Result<RasterImage> {
        Ok(RasterImage::new(RgbImage::new(0, 0)))
    }

    fn name(&self) -> &'static str {
        "empty-output"
    }
}

/// Memory-backed sequencer plus handles on its parts.
pub struct Harness {
    pub sequencer: UploadSequencer,
    pub renderer: Arc<RecordingRenderer>,
    pub transform: Arc<CountingTransform>,
    pub objects: Arc<MemoryObjectStore>,
    pub metadata: Arc<MemoryMetadataStore>,
}

pub fn harness() -> Harness {
    let renderer = Arc::new(RecordingRenderer::default());
    let transform = Arc::new(CountingTransform::default());
    let objects = Arc::new(MemoryObjectStore::new());
    let metadata = Arc::new(MemoryMetadataStore::new());
    let backend = Backend::new(objects.clone(), metadata.clone());
    let sequencer = UploadSequencer::new(
        renderer.clone(),
        transform.clone(),
        backend,
        UploadSettings::default(),
    );
    Harness {
        sequencer,
        renderer,
        transform,
        objects,
        metadata,
    }
}

/// Sequencer over arbitrary stores with a pass-through transform.
pub fn sequencer_with(
    objects: Arc<dyn ObjectStore>,
    metadata: Arc<dyn MetadataStore>,
) -> UploadSequencer {
    UploadSequencer::new(
        Arc::new(RecordingRenderer::default()),
        Arc::new(CountingTransform::default()),
        Backend::new(objects, metadata),
        UploadSettings::default(),
    )
}
