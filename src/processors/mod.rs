// boxfit/src/processors/mod.rs
mod batch;
mod canvas;
mod compressor;
pub mod discovery;
mod loader;
mod metadata;
mod rasterizer;
mod resizer;
mod trimmer;

pub use batch::{BatchProcessor, MeasuredBatch};
pub use canvas::CanvasPadder;
pub use compressor::{detect_format, Compressor};
pub use discovery::{discover, Discovery};
pub use loader::{LoadedImage, Loader, MAX_DIMENSION};
pub use metadata::{EmbeddedMetadata, MetadataProcessor};
pub use rasterizer::Rasterizer;
pub use resizer::{ResizeMode, Resizer};
pub use trimmer::{CropBox, Trimmer};

pub mod prelude {
    pub use super::{BatchProcessor, CanvasPadder, Compressor, Loader, Resizer, Trimmer};
}
