mod cli;
mod core;
mod processors;
mod utils;

pub use cli::{Algorithm, BatchArgs, Cli, Commands};
pub use crate::core::{
    BatchConfig, BatchReport, BoxfitError, ImageCandidate, ImageProcessor, NormalizedImage,
    ResizeAlgorithm, Result, SizeDistribution, TargetCanvas, TrimmedMeasurement,
    DEFAULT_EXTENSIONS,
};
pub use crate::core::sizing::lower_median_index;
pub use processors::{
    detect_format, discover, BatchProcessor, CanvasPadder, Compressor, CropBox, Discovery,
    EmbeddedMetadata, LoadedImage, Loader, MeasuredBatch, MetadataProcessor, Rasterizer,
    ResizeMode, Resizer, Trimmer, MAX_DIMENSION,
};
pub use utils::{
    file_extension, format_file_size, image_format_to_string, output_path, parse_hex_color,
};

pub mod prelude {
    pub use crate::processors::prelude::*;
    pub use crate::{BatchConfig, BatchReport, ImageProcessor, ResizeAlgorithm, TargetCanvas};
}

// Re-export commonly used types
pub use image::DynamicImage;
